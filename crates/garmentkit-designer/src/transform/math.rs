//! Pure geometry for the pointer gestures.
//!
//! Screen y grows downward and rotation is clockwise in degrees, matching
//! how elements are drawn.

use super::ResizeHandle;
use crate::model::Point;

/// Rotate a vector by `degrees`.
pub fn rotate_vector(dx: f64, dy: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Express a screen delta in an element's unrotated frame.
///
/// The delta is first divided by `zoom`, then rotated by `-rotation`.
pub fn to_local_delta(dx: f64, dy: f64, zoom: f64, rotation: f64) -> (f64, f64) {
    let zoom = if zoom > 0.0 { zoom } else { 1.0 };
    rotate_vector(dx / zoom, dy / zoom, -rotation)
}

/// New `(width, height)` after dragging `handle` by a local delta.
///
/// The top-left corner stays fixed in local space; each axis is clamped to
/// `min_size`.
pub fn resize_dimensions(
    handle: ResizeHandle,
    width: f64,
    height: f64,
    local_dx: f64,
    local_dy: f64,
    min_size: f64,
) -> (f64, f64) {
    let new_width = width + handle.width_sign() * local_dx;
    let new_height = height + handle.height_sign() * local_dy;
    (new_width.max(min_size), new_height.max(min_size))
}

/// Rotation that points the rotate handle (above the center at rest) at `pointer`.
///
/// Rounded to whole degrees and not normalized.
pub fn rotation_from_pointer(center: Point, pointer: Point) -> f64 {
    let angle = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees() + 90.0;
    angle.round()
}

/// Fold an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(360.0);
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Position after a drag step, kept non-negative.
pub fn drag_position(x: f64, y: f64, dx: f64, dy: f64) -> (f64, f64) {
    ((x + dx).max(0.0), (y + dy).max(0.0))
}
