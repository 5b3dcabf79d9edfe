use serde::{Deserialize, Serialize};
use std::fmt;

use super::ResizeHandle;
use crate::model::Point;

/// Kind of pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Drag,
    Resize,
    Rotate,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Rotate => "rotate",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pointer went down on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// Empty canvas; clears the selection.
    Background,
    /// An element body; selects it and starts a drag.
    Element { id: String, additive: bool },
    /// A resize handle, named in the element's own frame.
    Handle { id: String, handle: ResizeHandle },
    /// A resize handle, named by where it appears on screen.
    ScreenHandle { id: String, handle: ResizeHandle },
    /// The rotate handle above the element.
    RotateHandle { id: String },
}

/// Element geometry captured when a resize starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartGeometry {
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

/// Gesture state machine: `Idle → Dragging | Resizing | Rotating → Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Incremental drag; `last` is the previous pointer position.
    Dragging { last: Point },
    /// Absolute resize measured from the start pointer and geometry.
    Resizing {
        id: String,
        handle: ResizeHandle,
        start_pointer: Point,
        start: StartGeometry,
    },
    /// Rotation about `center`, in screen coordinates.
    Rotating { id: String, center: Point },
}

impl GestureState {
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Dragging { .. } => Some(GestureKind::Drag),
            Self::Resizing { .. } => Some(GestureKind::Resize),
            Self::Rotating { .. } => Some(GestureKind::Rotate),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
