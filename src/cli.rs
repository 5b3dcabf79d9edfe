//! Command-line interface.
//!
//! Every command opens a saved project record together with its garment
//! template, then renders or exports it:
//!
//! ```text
//! garmentkit preview    --project design.json --template tee.json --side back
//! garmentkit export     --project design.json --template tee.json --out shirt.png
//! garmentkit print-spec --project design.json --template tee.json
//! garmentkit config     --out ~/.config/garmentkit/config.toml
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use garmentkit_core::Side;
use garmentkit_designer::renderer::save_png;
use garmentkit_designer::{DesignerState, GarmentTemplate, LocalAssetSource};
use garmentkit_settings::DesignerConfig;

#[derive(Parser, Debug)]
#[command(name = "garmentkit")]
#[command(about = "Render and export printable garment designs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine configuration file (TOML or JSON); platform default when omitted
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the fast preview (text and shapes only) of one side
    Preview(RenderArgs),

    /// Render the full supersampled export of one side, images included
    Export(ExportArgs),

    /// Write the print specification for both sides
    PrintSpec(DocumentArgs),

    /// Write the default configuration to a file
    Config {
        /// Destination file; `.toml` or `.json`
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct DocumentArgs {
    /// Saved project record (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Garment template (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub template: PathBuf,

    /// Output file; derived from the design name when omitted
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Side to render; the record's current side when omitted
    #[arg(short, long)]
    pub side: Option<Side>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Directory asset references resolve against; the project's directory by default
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

/// Load the engine configuration from `path` or the platform default location.
pub fn load_config(path: Option<&Path>) -> Result<DesignerConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => DesignerConfig::default_path()?,
    };
    DesignerConfig::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn load_template(path: &Path) -> Result<GarmentTemplate> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse template {}", path.display()))
}

fn open_state(config: DesignerConfig, args: &DocumentArgs) -> Result<DesignerState> {
    let template = load_template(&args.template)?;
    let mut state = DesignerState::new(config);
    state.load_from_file(&args.project, template)?;
    Ok(state)
}

/// Output path: explicit, or `default_name` next to the project file.
fn output_path(args: &DocumentArgs, default_name: String) -> PathBuf {
    args.out.clone().unwrap_or_else(|| {
        args.project
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(default_name)
    })
}

fn write_default_config(out: Option<PathBuf>) -> Result<PathBuf> {
    let path = match out {
        Some(path) => path,
        None => DesignerConfig::default_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    DesignerConfig::default().save(&path)?;
    Ok(path)
}

/// Run a parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli { config, command } = cli;

    let written = match command {
        Commands::Config { out } => write_default_config(out)?,
        Commands::Preview(args) => {
            let state = open_state(load_config(config.as_deref())?, &args.document)?;
            let side = args.side.unwrap_or_else(|| state.current_side());
            let image = state.render_preview(side)?;
            let path = output_path(&args.document, state.download_file_name(side));
            save_png(&image, &path)?;
            path
        }
        Commands::Export(args) => {
            let document = &args.render.document;
            let state = open_state(load_config(config.as_deref())?, document)?;
            let side = args.render.side.unwrap_or_else(|| state.current_side());
            let root = args.assets.clone().unwrap_or_else(|| {
                document
                    .project
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            let image = state
                .render_export(side, &LocalAssetSource::new(root))
                .await?;
            let path = output_path(document, state.download_file_name(side));
            save_png(&image, &path)?;
            path
        }
        Commands::PrintSpec(args) => {
            let state = open_state(load_config(config.as_deref())?, &args)?;
            let stem = args
                .project
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("design");
            let path = output_path(&args, format!("{}-print.json", stem));
            state.export_print_spec(&path)?
        }
    };

    println!("{}", written.display());
    Ok(())
}
