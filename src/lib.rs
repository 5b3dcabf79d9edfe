//! # GarmentKit
//!
//! Headless front end for the garment design canvas engine. Opens saved
//! design records and renders previews, full exports and print
//! specifications from the command line.
//!
//! ## Architecture
//!
//! GarmentKit is organized as a workspace with multiple crates:
//!
//! 1. **garmentkit-core** - Side identifier, print units, errors, event bus
//! 2. **garmentkit-settings** - Engine configuration (TOML/JSON)
//! 3. **garmentkit-designer** - Element store, history, gestures, renderer, print spec
//! 4. **garmentkit** - CLI binary that ties the crates together

pub mod cli;

pub use garmentkit_core as core;
pub use garmentkit_designer as designer;
pub use garmentkit_settings as settings;

pub use garmentkit_core::{DesignEvent, EventBus, Side};
pub use garmentkit_designer::{
    DesignerError, DesignerState, GarmentTemplate, LocalAssetSource, PrintSpec, ProjectRecord,
};
pub use garmentkit_settings::DesignerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output, so files piped to stdout stay clean
/// - RUST_LOG environment variable support, `info` otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
