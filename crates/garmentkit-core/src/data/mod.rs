//! Data models shared across crates
//!
//! This module provides the garment side identifier used to key per-side
//! element lists, histories and exported images.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Garment side being designed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Front of the garment
    #[default]
    Front,
    /// Back of the garment
    Back,
}

impl Side {
    /// Both sides, front first
    pub const ALL: [Side; 2] = [Side::Front, Side::Back];

    /// The opposite side
    pub fn other(&self) -> Side {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }

    /// Lowercase name as used in file names and wire formats
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "front" => Ok(Side::Front),
            "back" => Ok(Side::Back),
            other => Err(format!("Unknown side '{}'", other)),
        }
    }
}
