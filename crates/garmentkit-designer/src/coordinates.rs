//! Coordinate mapping between canvas pixels, design-area-local pixels and
//! real-world units.
//!
//! ```text
//! design_area_px  = canvas_px_width * (100 - left% - right%) / 100
//! px_to_cm ratio  = print_area_width_cm / design_area_px
//! font_pt         = font_px * ratio * pt_factor
//! ```
//!
//! The ratio falls back to 1 whenever a measurement is missing so that an
//! incomplete template never produces zeros or NaNs in an export.

use garmentkit_core::Side;

use crate::model::{DesignArea, DesignElement, GarmentTemplate};

/// Default pixel to point factor applied on top of the cm ratio.
pub const DEFAULT_FONT_PT_FACTOR: f64 = 10.0;

/// Pixel to centimeter ratio for a design area, or `None` if it cannot be computed.
pub fn pixel_to_cm_ratio(
    print_width_cm: Option<f64>,
    canvas_pixel_width: f64,
    area: &DesignArea,
) -> Option<f64> {
    let print_width_cm = print_width_cm.filter(|w| w.is_finite() && *w > 0.0)?;
    let area_px = area.pixel_width(canvas_pixel_width);
    (area_px.is_finite() && area_px > 0.0).then(|| print_width_cm / area_px)
}

/// Maps design-area-local pixels to real-world units for one template, side and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    ratio: f64,
}

impl CoordinateMapper {
    /// Build the mapper for the selected template, side and size.
    pub fn new(template: Option<&GarmentTemplate>, side: Side, size: &str) -> Self {
        let ratio = template.and_then(|t| {
            pixel_to_cm_ratio(
                t.print_area(size).map(|p| p.width_cm),
                t.pixel_width as f64,
                t.design_area(side),
            )
        });

        match ratio {
            Some(ratio) => Self { ratio },
            None => {
                tracing::debug!(
                    "No print measurements for size '{}' on {}, using 1:1 ratio",
                    size,
                    side
                );
                Self::identity()
            }
        }
    }

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            Self { ratio }
        } else {
            Self::identity()
        }
    }

    pub fn identity() -> Self {
        Self { ratio: 1.0 }
    }

    /// Centimeters per design-area pixel.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn px_to_cm(&self, px: f64) -> f64 {
        px * self.ratio
    }

    pub fn cm_to_px(&self, cm: f64) -> f64 {
        cm / self.ratio
    }

    pub fn font_px_to_pt(&self, px: f64, pt_factor: f64) -> f64 {
        px * self.ratio * pt_factor
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Place an element's unrotated box on the full garment canvas.
pub fn element_canvas_rect(template: &GarmentTemplate, side: Side, element: &DesignElement) -> CanvasRect {
    let (ox, oy) = template
        .design_area(side)
        .origin(template.pixel_width as f64, template.pixel_height as f64);
    CanvasRect {
        x: ox + element.x,
        y: oy + element.y,
        width: element.width,
        height: element.height,
    }
}
