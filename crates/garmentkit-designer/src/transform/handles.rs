use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight resize handles around an element box.
///
/// Handles are named in the element's own (unrotated) frame: `N` is the
/// middle of the top edge before rotation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// Clockwise compass order starting at north.
    pub const COMPASS: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::N => 0,
            Self::Ne => 1,
            Self::E => 2,
            Self::Se => 3,
            Self::S => 4,
            Self::Sw => 5,
            Self::W => 6,
            Self::Nw => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    /// Width factor: +1 for east handles, -1 for west handles, 0 otherwise.
    pub fn width_sign(self) -> f64 {
        match self {
            Self::E | Self::Ne | Self::Se => 1.0,
            Self::W | Self::Nw | Self::Sw => -1.0,
            Self::N | Self::S => 0.0,
        }
    }

    /// Height factor: +1 for south handles, -1 for north handles, 0 otherwise.
    pub fn height_sign(self) -> f64 {
        match self {
            Self::S | Self::Se | Self::Sw => 1.0,
            Self::N | Self::Ne | Self::Nw => -1.0,
            Self::E | Self::W => 0.0,
        }
    }

    /// The handle shown on screen at this handle's position for an element
    /// rotated by `rotation` degrees, snapped to 45° steps.
    pub fn on_screen(self, rotation: f64) -> ResizeHandle {
        Self::COMPASS[(self.index() + rotation_steps(rotation)) % 8]
    }

    /// Cursor name for this handle, e.g. `"ne-resize"`, tracking rotation.
    pub fn cursor(self, rotation: f64) -> String {
        format!("{}-resize", self.on_screen(rotation).as_str())
    }

    /// Map the handle the user grabbed at screen position `screen` back to
    /// the element's own handle. Inverse of [`ResizeHandle::on_screen`].
    pub fn from_screen(screen: ResizeHandle, rotation: f64) -> ResizeHandle {
        Self::COMPASS[(screen.index() + 8 - rotation_steps(rotation)) % 8]
    }
}

/// Number of 45° steps in `rotation`, in `0..8`.
pub fn rotation_steps(rotation: f64) -> usize {
    let steps = (rotation / 45.0).round() as i64;
    steps.rem_euclid(8) as usize
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::COMPASS
            .into_iter()
            .find(|h| h.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown resize handle '{}'", s))
    }
}
