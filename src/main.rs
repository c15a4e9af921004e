use anyhow::Result;
use clap::Parser;
use tracing::info;

use rainfall_predictor::{Cli, RainfallPredictor};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    let _log_guard = logging::init(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Rainfall predictor starting");

    let service = RainfallPredictor::new(config);
    if !service.model_loaded() {
        info!("Serving in degraded mode: every prediction will return 500");
    }

    service.run().await?;

    info!("Rainfall predictor stopped");
    Ok(())
}
