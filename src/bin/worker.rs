//! Market Scout Worker
//!
//! Rescans the universe on a fixed cadence and logs the leaders.

use dotenvy::dotenv;
use market_scout::config::{get_environment, get_scan_interval_seconds, ScanConfig};
use market_scout::core::scheduler::ScanScheduler;
use market_scout::logging;
use market_scout::scanner::ScanOrchestrator;
use market_scout::services;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let interval = get_scan_interval_seconds();
    info!("Starting Market Scout Worker");
    info!(environment = %get_environment(), "Environment");

    if interval == 0 {
        return Err("SCAN_INTERVAL_SECONDS must be > 0 for worker".into());
    }

    let config = ScanConfig::from_env()?;
    let provider = services::build_provider(&config)?;
    let scanner = Arc::new(ScanOrchestrator::from_config(provider, &config));

    let scheduler = ScanScheduler::new(scanner, config.universe, interval)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;
    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
