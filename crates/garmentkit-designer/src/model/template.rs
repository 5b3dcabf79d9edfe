use garmentkit_core::Side;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DesignerError, DesignerResult};

/// Printable sub-rectangle of the garment canvas, as percentage insets
/// from each edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DesignArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Fraction of the canvas width covered by the area.
    pub fn width_fraction(&self) -> f64 {
        (100.0 - self.left - self.right) / 100.0
    }

    /// Fraction of the canvas height covered by the area.
    pub fn height_fraction(&self) -> f64 {
        (100.0 - self.top - self.bottom) / 100.0
    }

    /// Top-left corner of the area in canvas pixels.
    pub fn origin(&self, canvas_width: f64, canvas_height: f64) -> (f64, f64) {
        (
            canvas_width * self.left / 100.0,
            canvas_height * self.top / 100.0,
        )
    }

    pub fn pixel_width(&self, canvas_width: f64) -> f64 {
        canvas_width * self.width_fraction()
    }

    pub fn pixel_height(&self, canvas_height: f64) -> f64 {
        canvas_height * self.height_fraction()
    }

    fn validate(&self, side: Side) -> DesignerResult<()> {
        let insets = [self.left, self.top, self.right, self.bottom];
        if insets.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(DesignerError::InvalidTemplate {
                reason: format!("{} design area has a negative inset", side),
            });
        }
        if self.width_fraction() <= 0.0 || self.height_fraction() <= 0.0 {
            return Err(DesignerError::InvalidTemplate {
                reason: format!("{} design area is empty", side),
            });
        }
        Ok(())
    }
}

impl Default for DesignArea {
    fn default() -> Self {
        Self::new(25.0, 20.0, 25.0, 20.0)
    }
}

/// Real-world print area for one garment size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintArea {
    pub width_cm: f64,
    pub height_cm: f64,
}

/// A catalog-defined base garment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    #[serde(default)]
    pub front_design_area: DesignArea,
    #[serde(default)]
    pub back_design_area: DesignArea,
    /// Print area per size name (`S`, `M`, ...).
    #[serde(default)]
    pub sizes: BTreeMap<String, PrintArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_image: Option<String>,
}

impl GarmentTemplate {
    pub fn new(id: impl Into<String>, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            pixel_width,
            pixel_height,
            front_design_area: DesignArea::default(),
            back_design_area: DesignArea::default(),
            sizes: BTreeMap::new(),
            front_image: None,
            back_image: None,
        }
    }

    pub fn with_design_area(mut self, side: Side, area: DesignArea) -> Self {
        match side {
            Side::Front => self.front_design_area = area,
            Side::Back => self.back_design_area = area,
        }
        self
    }

    pub fn with_size(mut self, name: impl Into<String>, width_cm: f64, height_cm: f64) -> Self {
        self.sizes.insert(name.into(), PrintArea { width_cm, height_cm });
        self
    }

    pub fn design_area(&self, side: Side) -> &DesignArea {
        match side {
            Side::Front => &self.front_design_area,
            Side::Back => &self.back_design_area,
        }
    }

    pub fn image(&self, side: Side) -> Option<&str> {
        match side {
            Side::Front => self.front_image.as_deref(),
            Side::Back => self.back_image.as_deref(),
        }
    }

    pub fn print_area(&self, size: &str) -> Option<&PrintArea> {
        self.sizes.get(size)
    }

    /// Design area size in pixels for a side.
    pub fn design_area_size(&self, side: Side) -> (f64, f64) {
        let area = self.design_area(side);
        (
            area.pixel_width(self.pixel_width as f64),
            area.pixel_height(self.pixel_height as f64),
        )
    }

    pub fn validate(&self) -> DesignerResult<()> {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(DesignerError::InvalidTemplate {
                reason: format!(
                    "canvas must be non-empty, got {}x{}",
                    self.pixel_width, self.pixel_height
                ),
            });
        }
        self.front_design_area.validate(Side::Front)?;
        self.back_design_area.validate(Side::Back)?;
        Ok(())
    }
}
