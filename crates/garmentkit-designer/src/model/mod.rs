//! Design data model: elements, garment templates and colors.

use serde::{Deserialize, Serialize};

mod color;
mod element;
mod template;

pub use color::Rgba;
pub use element::{
    DesignElement, ElementKind, ElementPatch, ShapeKind, TextAlign, TextOutline, TextShadow,
    MIN_ELEMENT_SIZE,
};
pub use template::{DesignArea, GarmentTemplate, PrintArea};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
