//! Market data providers.

pub mod fallback;
pub mod market_data;
pub mod yahoo;

pub use fallback::{FallbackMarketDataProvider, NamedProvider};
pub use market_data::{InMemoryMarketDataProvider, MarketDataError, MarketDataProvider};
pub use yahoo::YahooMarketDataProvider;

use crate::config::ScanConfig;
use std::sync::Arc;

/// Build the provider described by `config`: Yahoo alone, or Yahoo backed by
/// a second Yahoo host when a backup URL is configured.
pub fn build_provider(config: &ScanConfig) -> Result<Arc<dyn MarketDataProvider>, MarketDataError> {
    let primary = Arc::new(YahooMarketDataProvider::new(&config.yahoo)?);
    let Some(backup_url) = &config.yahoo.backup_base_url else {
        return Ok(primary);
    };

    let mut backup_config = config.yahoo.clone();
    backup_config.base_url = backup_url.clone();
    let backup = Arc::new(YahooMarketDataProvider::new(&backup_config)?);

    Ok(Arc::new(FallbackMarketDataProvider::new(
        NamedProvider::new(config.yahoo.base_url.clone(), primary),
        NamedProvider::new(backup_url.clone(), backup),
    )))
}
