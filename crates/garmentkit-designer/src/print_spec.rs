//! Print specification export.
//!
//! A pure transform of both sides' element lists into real-world units for a
//! print vendor. Positions and sizes are unit-suffixed centimeter strings,
//! font sizes are points, and image payloads are replaced by a placeholder.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use garmentkit_core::{format_measure, PrintUnit, Side};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coordinates::CoordinateMapper;
use crate::model::{DesignElement, ElementKind, GarmentTemplate, TextAlign, TextOutline, TextShadow};

/// Export parameters taken from the engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintSpecOptions {
    pub font_pt_factor: f64,
    pub image_placeholder: String,
}

impl Default for PrintSpecOptions {
    fn default() -> Self {
        Self {
            font_pt_factor: crate::coordinates::DEFAULT_FONT_PT_FACTOR,
            image_placeholder: "[image]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintPosition {
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintSize {
    pub width: String,
    pub height: String,
}

/// Text styling in print units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintTextStyle {
    pub font_size: String,
    pub font_weight: String,
    pub font_family: String,
    pub text_align: TextAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<TextShadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<TextOutline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub content: String,
    pub position: PrintPosition,
    pub size: PrintSize,
    /// Degrees in `[0, 360)`.
    pub rotation: f64,
    pub opacity: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<PrintTextStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSpec {
    pub name: String,
    pub garment_template_id: String,
    pub garment_color: String,
    pub garment_size: String,
    /// Set when the specification is written out; `build_print_spec` leaves it empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    pub pixel_to_cm_ratio: SideRatios,
    pub front: Vec<PrintElement>,
    pub back: Vec<PrintElement>,
}

/// Ratio per side; the two sides may have different design areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideRatios {
    pub front: f64,
    pub back: f64,
}

impl PrintSpec {
    pub fn side(&self, side: Side) -> &[PrintElement] {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the spec as pretty JSON, forcing a `.json` extension.
    ///
    /// Returns the path actually written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = json_path(path.as_ref());
        let json = self.to_json().context("Failed to serialize print specification")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write print specification {}", path.display()))?;
        tracing::info!(
            "Wrote print specification for '{}' ({} front, {} back) to {}",
            self.name,
            self.front.len(),
            self.back.len(),
            path.display()
        );
        Ok(path)
    }
}

fn json_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("json") => path.to_path_buf(),
        _ => path.with_extension("json"),
    }
}

/// Convert one element with the given mapper.
pub fn print_element(
    element: &DesignElement,
    mapper: &CoordinateMapper,
    options: &PrintSpecOptions,
) -> PrintElement {
    let cm = |px: f64| format_measure(mapper.px_to_cm(px), PrintUnit::Centimeter);

    let content = match element.kind {
        ElementKind::Image => options.image_placeholder.clone(),
        _ => element.content.clone(),
    };

    let text = (element.kind == ElementKind::Text).then(|| PrintTextStyle {
        font_size: format_measure(
            mapper.font_px_to_pt(element.font_size, options.font_pt_factor),
            PrintUnit::Point,
        ),
        font_weight: element.font_weight.clone(),
        font_family: element.font_family.clone(),
        text_align: element.text_align,
        background_color: element.text_background_color.clone(),
        shadow: element.text_shadow.clone(),
        outline: element.text_outline.clone(),
    });

    PrintElement {
        id: element.id.clone(),
        kind: element.kind,
        content,
        position: PrintPosition {
            x: cm(element.x),
            y: cm(element.y),
        },
        size: PrintSize {
            width: cm(element.width),
            height: cm(element.height),
        },
        rotation: element.normalized_rotation(),
        opacity: element.opacity,
        color: element.color.clone(),
        text,
    }
}

/// Inputs for a print specification.
#[derive(Debug, Clone, Copy)]
pub struct PrintSpecInput<'a> {
    pub name: &'a str,
    pub template: Option<&'a GarmentTemplate>,
    pub garment_template_id: &'a str,
    pub garment_color: &'a str,
    pub garment_size: &'a str,
    pub front: &'a [DesignElement],
    pub back: &'a [DesignElement],
}

/// Build the print specification for both sides.
pub fn build_print_spec(input: PrintSpecInput<'_>, options: &PrintSpecOptions) -> PrintSpec {
    let front_mapper = CoordinateMapper::new(input.template, Side::Front, input.garment_size);
    let back_mapper = CoordinateMapper::new(input.template, Side::Back, input.garment_size);

    let convert = |elements: &[DesignElement], mapper: &CoordinateMapper| {
        elements
            .iter()
            .map(|e| print_element(e, mapper, options))
            .collect::<Vec<_>>()
    };

    PrintSpec {
        name: input.name.to_string(),
        garment_template_id: input.garment_template_id.to_string(),
        garment_color: input.garment_color.to_string(),
        garment_size: input.garment_size.to_string(),
        generated_at: None,
        pixel_to_cm_ratio: SideRatios {
            front: front_mapper.ratio(),
            back: back_mapper.ratio(),
        },
        front: convert(input.front, &front_mapper),
        back: convert(input.back, &back_mapper),
    }
}
