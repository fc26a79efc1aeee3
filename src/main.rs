//! Market Scout CLI
//!
//! Runs one scan of the configured universe and prints the ranked table.

use dotenvy::dotenv;
use market_scout::config::{get_environment, ScanConfig};
use market_scout::logging;
use market_scout::report;
use market_scout::scanner::ScanOrchestrator;
use market_scout::services;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScanConfig::from_env()?;
    info!(
        environment = %get_environment(),
        tickers = config.universe.len(),
        range = %config.history_range,
        concurrency = config.concurrency,
        "Starting Market Scout scan"
    );

    let provider = services::build_provider(&config)?;
    let scanner = ScanOrchestrator::from_config(provider, &config);
    let scan = scanner.run_scan(&config.universe).await;

    println!("{}", chrono::Local::now().format("Market scan as of %Y-%m-%d %H:%M"));
    println!();
    print!("{}", report::render_table(&scan));
    println!();
    print!("{}", report::legend());

    Ok(())
}
