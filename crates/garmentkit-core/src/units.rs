//! Unit conversion utilities
//!
//! Handles the real-world units used by print specifications: lengths in
//! centimeters, millimeters or inches, and font sizes in points. Measurements
//! travel as unit-suffixed strings such as `"12.34 cm"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnitError;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Real-world unit used in exported measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintUnit {
    /// Centimeters (positions and sizes)
    Centimeter,
    /// Millimeters
    Millimeter,
    /// Inches
    Inch,
    /// Typographic points (font sizes)
    Point,
}

impl Default for PrintUnit {
    fn default() -> Self {
        Self::Centimeter
    }
}

impl PrintUnit {
    /// Short suffix used in formatted measurements.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
            Self::Inch => "in",
            Self::Point => "pt",
        }
    }

    /// Whether the unit measures length (as opposed to type size).
    pub fn is_length(&self) -> bool {
        !matches!(self, Self::Point)
    }

    fn cm_factor(&self) -> Option<f64> {
        match self {
            Self::Centimeter => Some(1.0),
            Self::Millimeter => Some(0.1),
            Self::Inch => Some(CM_PER_INCH),
            Self::Point => None,
        }
    }
}

impl fmt::Display for PrintUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl FromStr for PrintUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeter),
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeter),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            "pt" | "point" | "points" => Ok(Self::Point),
            other => Err(UnitError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

/// Format a value with its unit suffix.
///
/// Lengths carry two decimals (`"12.34 cm"`), point sizes one (`"36.0 pt"`).
pub fn format_measure(value: f64, unit: PrintUnit) -> String {
    if unit.is_length() {
        format!("{:.2} {}", value, unit)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

/// Parse a unit-suffixed measurement such as `"12.34 cm"` or `"8in"`.
pub fn parse_measure(input: &str) -> Result<(f64, PrintUnit), UnitError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UnitError::Empty);
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|_| UnitError::InvalidNumber {
            input: input.to_string(),
        })?;

    let unit = if unit.trim().is_empty() {
        PrintUnit::default()
    } else {
        unit.parse()?
    };

    Ok((value, unit))
}

/// Convert a length between units.
///
/// Returns `None` when either unit is not a length unit.
pub fn convert_length(value: f64, from: PrintUnit, to: PrintUnit) -> Option<f64> {
    Some(value * from.cm_factor()? / to.cm_factor()?)
}
