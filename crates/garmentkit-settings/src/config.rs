//! Configuration management for the GarmentKit design engine
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default location is the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - History (undo depth)
//! - Geometry (minimum element size, duplicate/paste offsets, insert sizing)
//! - Export (supersampling, pixel to point factor, image placeholder)
//! - Viewport (zoom range)
//! - Defaults for new text and shape elements

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Smallest width/height an element may have, in design-area pixels.
/// `geometry.min_element_size` may raise this floor but never lower it.
pub const MIN_ELEMENT_SIZE: f64 = 30.0;

/// Undo/redo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of snapshots kept per side (including the initial one)
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: 50 }
    }
}

/// Geometry limits and offsets, all in design-area pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Smallest width/height an element may have
    pub min_element_size: f64,
    /// Offset applied to duplicated elements
    pub duplicate_offset: f64,
    /// Offset applied to pasted elements
    pub paste_offset: f64,
    /// Longest edge of a freshly inserted image or sticker
    pub image_insert_max_size: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            min_element_size: MIN_ELEMENT_SIZE,
            duplicate_offset: 20.0,
            paste_offset: 30.0,
            image_insert_max_size: 200.0,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Supersampling multiple for the full export raster
    pub supersample: u32,
    /// Pixel to point factor applied after the cm ratio for font sizes
    pub font_pt_factor: f64,
    /// Text written in place of image content in print specifications
    pub image_placeholder: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            supersample: 3,
            font_pt_factor: 10.0,
            image_placeholder: "[image]".to_string(),
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Smallest zoom factor
    pub min_zoom: f64,
    /// Largest zoom factor
    pub max_zoom: f64,
    /// Multiplicative step used by zoom in/out
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 1.1,
        }
    }
}

/// Defaults for newly created text elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    /// Initial text content
    pub content: String,
    /// Font family name
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f64,
    /// CSS-style font weight (`normal`, `bold`, ...)
    pub font_weight: String,
    /// Text color
    pub color: String,
    /// Initial box width
    pub width: f64,
    /// Initial box height
    pub height: f64,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            content: "Your text".to_string(),
            font_family: "Arial".to_string(),
            font_size: 24.0,
            font_weight: "normal".to_string(),
            color: "#000000".to_string(),
            width: 200.0,
            height: 50.0,
        }
    }
}

/// Defaults for newly created shape elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    /// Initial square edge length
    pub size: f64,
    /// Fill color
    pub color: String,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            size: 100.0,
            color: "#3b82f6".to_string(),
        }
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesignerConfig {
    /// History settings
    pub history: HistorySettings,
    /// Geometry settings
    pub geometry: GeometrySettings,
    /// Export settings
    pub export: ExportSettings,
    /// Viewport settings
    pub viewport: ViewportSettings,
    /// Text element defaults
    pub text: TextDefaults,
    /// Shape element defaults
    pub shape: ShapeDefaults,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl DesignerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/garmentkit/config.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir(std::env::consts::OS))?;
        Ok(dir.join("garmentkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => {
                serde_json::from_str(&content).map_err(|e| SettingsError::parse(path, e))?
            }
            Format::Toml => toml::from_str(&content).map_err(|e| SettingsError::parse(path, e))?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| SettingsError::Serialize(e.to_string()))?,
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))?
            }
        };

        let write_err = |source: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.history.limit == 0 {
            return Err(ConfigError::out_of_range("history.limit", self.history.limit));
        }

        let geometry = &self.geometry;
        if geometry.min_element_size.is_nan() || geometry.min_element_size < MIN_ELEMENT_SIZE {
            return Err(ConfigError::out_of_range(
                "geometry.min_element_size",
                geometry.min_element_size,
            ));
        }
        if geometry.image_insert_max_size < geometry.min_element_size {
            return Err(ConfigError::out_of_range(
                "geometry.image_insert_max_size",
                geometry.image_insert_max_size,
            ));
        }

        if self.export.supersample == 0 {
            return Err(ConfigError::out_of_range(
                "export.supersample",
                self.export.supersample,
            ));
        }
        if self.export.font_pt_factor <= 0.0 {
            return Err(ConfigError::out_of_range(
                "export.font_pt_factor",
                self.export.font_pt_factor,
            ));
        }

        let viewport = &self.viewport;
        if viewport.min_zoom <= 0.0 || viewport.min_zoom >= viewport.max_zoom {
            return Err(ConfigError::out_of_range(
                "viewport.min_zoom",
                viewport.min_zoom,
            ));
        }
        if viewport.zoom_step <= 1.0 {
            return Err(ConfigError::out_of_range(
                "viewport.zoom_step",
                viewport.zoom_step,
            ));
        }

        if self.text.font_size <= 0.0 {
            return Err(ConfigError::out_of_range("text.font_size", self.text.font_size));
        }
        if self.shape.size <= 0.0 {
            return Err(ConfigError::out_of_range("shape.size", self.shape.size));
        }

        Ok(())
    }
}
