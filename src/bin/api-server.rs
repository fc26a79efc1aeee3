//! Market Scout API Server
//!
//! HTTP API with health check, metrics and on-demand scan endpoints.
//! Stateless: every scan request fetches fresh data.

use dotenvy::dotenv;
use market_scout::config::{get_environment, get_port, ScanConfig};
use market_scout::core::http::start_server;
use market_scout::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let port = get_port();
    let config = ScanConfig::from_env()?;

    info!("Starting Market Scout API Server");
    info!(environment = %get_environment(), "Environment");
    info!(port = port, tickers = config.universe.len(), "HTTP Server: http://0.0.0.0:{}", port);

    let server = start_server(port, config);

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = server => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
