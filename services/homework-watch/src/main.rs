//! Homework watch CLI
//!
//! Command-line entry point for the homework review status watcher.

use std::path::PathBuf;

use clap::Parser;
use homework_watch::{load_config, Config, Credentials, WatchBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-watch")]
#[command(about = "Watches homework review status and reports changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between poll cycles (overrides config file)
    #[arg(long)]
    retry_period: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_period={:?}, log_level={:?}",
        args.config,
        args.retry_period,
        args.log_level
    );

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(retry_period) = args.retry_period {
        config.retry_period_seconds = retry_period;
    }

    let credentials = Credentials::from_env()?;

    tracing::info!("Starting homework watch");
    WatchBuilder::new(config, credentials).build()?.start().await;

    Ok(())
}
