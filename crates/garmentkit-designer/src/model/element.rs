use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::Point;

pub use garmentkit_settings::MIN_ELEMENT_SIZE;

/// What a design element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Shape,
    Image,
    Sticker,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Shape => "shape",
            Self::Image => "image",
            Self::Sticker => "sticker",
        }
    }

    /// Image-backed kinds whose content is an asset reference.
    pub fn is_raster(&self) -> bool {
        matches!(self, Self::Image | Self::Sticker)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape tag stored in a shape element's `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rect" | "rectangle" | "square" => Ok(Self::Rect),
            "circle" | "ellipse" | "oval" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            other => Err(format!("Unknown shape '{}'", other)),
        }
    }
}

/// Horizontal text alignment inside the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    pub dx: f64,
    pub dy: f64,
    #[serde(default)]
    pub blur: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOutline {
    pub width: f64,
    pub color: String,
}

fn default_opacity() -> f64 {
    100.0
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_family() -> String {
    "Arial".to_string()
}

/// A single placed object on one side of the garment.
///
/// Geometry is in design-area-local pixels: `x`/`y` is the unrotated top-left
/// corner relative to the design area origin, and rotation (degrees,
/// clockwise) is applied about the box center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignElement {
    pub id: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<TextShadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_outline: Option<TextOutline>,
    #[serde(default)]
    pub is_locked: bool,
}

impl DesignElement {
    /// Generate a fresh element id.
    pub fn new_id() -> String {
        format!("el_{}", Uuid::new_v4().simple())
    }

    /// Create an element with default styling.
    pub fn new(kind: ElementKind, content: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Self::new_id(),
            kind,
            x,
            y,
            width: width.max(MIN_ELEMENT_SIZE),
            height: height.max(MIN_ELEMENT_SIZE),
            rotation: 0.0,
            opacity: default_opacity(),
            content: content.into(),
            color: default_color(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_family: default_font_family(),
            text_align: TextAlign::default(),
            text_background_color: None,
            text_shadow: None,
            text_outline: None,
            is_locked: false,
        }
    }

    pub fn text(content: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Text, content, x, y, width, height)
    }

    pub fn shape(shape: ShapeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Shape, shape.as_str(), x, y, width, height)
    }

    pub fn image(reference: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Image, reference, x, y, width, height)
    }

    pub fn sticker(reference: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(ElementKind::Sticker, reference, x, y, width, height)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Shape tag for shape elements; unknown tags fall back to a rectangle.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        (self.kind == ElementKind::Shape).then(|| self.content.parse().unwrap_or(ShapeKind::Rect))
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Rotation folded into `[0, 360)`.
    pub fn normalized_rotation(&self) -> f64 {
        crate::transform::normalize_degrees(self.rotation)
    }

    /// CSS-style weights of 600 and above, or `bold`/`bolder`, render bold.
    pub fn is_bold(&self) -> bool {
        match self.font_weight.trim().to_lowercase().as_str() {
            "bold" | "bolder" => true,
            other => other.parse::<u32>().is_ok_and(|w| w >= 600),
        }
    }

    /// Re-establish the geometry and opacity bounds.
    pub fn clamp(&mut self, min_size: f64) {
        self.width = self.width.max(min_size);
        self.height = self.height.max(min_size);
        self.opacity = self.opacity.clamp(0.0, 100.0);
    }

    /// Copy with a fresh id, shifted by `offset` on both axes and unlocked.
    pub fn cloned_with_offset(&self, offset: f64) -> Self {
        Self {
            id: Self::new_id(),
            x: self.x + offset,
            y: self.y + offset,
            is_locked: false,
            ..self.clone()
        }
    }
}

/// A partial update of an element's properties.
///
/// `None` leaves a field untouched. The nested options on the optional text
/// decorations distinguish "leave" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub font_family: Option<String>,
    pub text_align: Option<TextAlign>,
    pub text_background_color: Option<Option<String>>,
    pub text_shadow: Option<Option<TextShadow>>,
    pub text_outline: Option<Option<TextOutline>>,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Apply to `element`, re-clamping geometry. Returns whether anything changed.
    pub fn apply_to(&self, element: &mut DesignElement, min_size: f64) -> bool {
        let before = element.clone();

        if let Some(x) = self.x {
            element.x = x.max(0.0);
        }
        if let Some(y) = self.y {
            element.y = y.max(0.0);
        }
        if let Some(width) = self.width {
            element.width = width;
        }
        if let Some(height) = self.height {
            element.height = height;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity;
        }
        if let Some(content) = &self.content {
            element.content = content.clone();
        }
        if let Some(color) = &self.color {
            element.color = color.clone();
        }
        if let Some(font_size) = self.font_size {
            element.font_size = font_size.max(1.0);
        }
        if let Some(font_weight) = &self.font_weight {
            element.font_weight = font_weight.clone();
        }
        if let Some(font_family) = &self.font_family {
            element.font_family = font_family.clone();
        }
        if let Some(text_align) = self.text_align {
            element.text_align = text_align;
        }
        if let Some(background) = &self.text_background_color {
            element.text_background_color = background.clone();
        }
        if let Some(shadow) = &self.text_shadow {
            element.text_shadow = shadow.clone();
        }
        if let Some(outline) = &self.text_outline {
            element.text_outline = outline.clone();
        }

        element.clamp(min_size);
        *element != before
    }
}
