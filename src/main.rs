use clap::Parser;

use propreg_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use propreg_lib::cli::Cli;
use propreg_lib::shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bootstrap::resolve_config(&cli)?;

    init_tracing_subscriber(config.log_dir.as_deref())?;
    tracing::info!(?config, "configuration resolved");

    let runtime = bootstrap::wire(config)?;
    Shell::new(runtime).run().await
}
