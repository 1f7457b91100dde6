//! HealthGo desktop simulator
//!
//! Main entry point: replays every configured patient source to the backend
//! and keeps running until the process is killed.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use healthgo_simulator::{config, simulator, websocket::WsConnector};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "healthgo-simulator", about = "Replays recorded patient vitals to the HealthGo backend")]
struct Cli {
    /// Extra configuration file, applied over config/default and config/$HEALTHGO_ENV
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    info!("starting HealthGo desktop simulator");

    // Load configuration
    let settings = config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    for warning in settings.warnings() {
        warn!("{}", warning);
    }
    info!(
        backend = %settings.backend_url,
        endpoint = %settings.websocket_url,
        interval_ms = settings.send_interval_ms,
        sources = settings.patient_files.len(),
        "configuration loaded"
    );

    simulator::run_forever(&settings, Arc::new(WsConnector)).await;
    Ok(())
}
