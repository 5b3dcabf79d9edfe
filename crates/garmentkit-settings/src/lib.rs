//! GarmentKit Settings Crate
//!
//! Handles the design engine configuration: history depth, geometry limits,
//! export scaling, viewport zoom range and defaults for newly created
//! elements.

pub mod config;
pub mod error;

pub use config::{
    DesignerConfig, ExportSettings, GeometrySettings, HistorySettings, ShapeDefaults,
    TextDefaults, ViewportSettings, MIN_ELEMENT_SIZE,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
