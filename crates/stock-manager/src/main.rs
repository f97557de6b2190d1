use clap::Parser;
use record_actor::tracing::setup_tracing;
use stock_manager::cli::{self, Cli};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    info!("Starting stock manager");

    cli::run(cli).await?;

    info!("Application completed successfully");
    Ok(())
}
