use clap::Parser;
use garmentkit::cli::{run, Cli};
use garmentkit::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::debug!("garmentkit {} (built {})", garmentkit::VERSION, garmentkit::BUILD_DATE);

    run(Cli::parse()).await
}
