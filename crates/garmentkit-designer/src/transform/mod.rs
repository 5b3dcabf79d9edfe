//! Transform engine: resize handles, gesture state and the pointer math
//! behind drag, resize and rotate.

mod gesture;
mod handles;
mod math;

pub use gesture::{GestureKind, GestureState, PointerTarget, StartGeometry};
pub use handles::{rotation_steps, ResizeHandle};
pub use math::{
    drag_position, normalize_degrees, resize_dimensions, rotate_vector, rotation_from_pointer,
    to_local_delta,
};
