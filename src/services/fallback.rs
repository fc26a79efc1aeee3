//! Primary/backup provider composition.
//!
//! Every call goes to the primary first. A failed call is repeated once on the
//! backup; the backup's error is what the caller sees when both fail.

use crate::models::{FundamentalMetrics, HistoryRange, PriceHistory};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// A provider with the label used in logs and source reporting.
#[derive(Clone)]
pub struct NamedProvider {
    pub name: String,
    pub provider: Arc<dyn MarketDataProvider>,
}

impl NamedProvider {
    pub fn new(name: impl Into<String>, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            name: name.into(),
            provider,
        }
    }
}

pub struct FallbackMarketDataProvider {
    primary: NamedProvider,
    backup: NamedProvider,
    used_backup: AtomicBool,
    fallbacks: AtomicU64,
}

impl FallbackMarketDataProvider {
    pub fn new(primary: NamedProvider, backup: NamedProvider) -> Self {
        Self {
            primary,
            backup,
            used_backup: AtomicBool::new(false),
            fallbacks: AtomicU64::new(0),
        }
    }

    /// Name of the source serving data: the primary until the backup has
    /// served a call, the backup from then on.
    pub fn active_source(&self) -> &str {
        if self.used_backup.load(Ordering::Relaxed) {
            &self.backup.name
        } else {
            &self.primary.name
        }
    }

    /// Calls answered by the backup after the primary failed.
    pub fn fallback_count(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    async fn route<'a, T, F, Fut>(&'a self, symbol: &str, call: F) -> Result<T, MarketDataError>
    where
        F: Fn(&'a dyn MarketDataProvider) -> Fut,
        Fut: Future<Output = Result<T, MarketDataError>>,
    {
        let primary_err = match call(self.primary.provider.as_ref()).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        warn!(
            symbol = %symbol,
            primary = %self.primary.name,
            backup = %self.backup.name,
            error = %primary_err,
            "Primary source failed, switching to backup"
        );

        let value = call(self.backup.provider.as_ref()).await?;
        self.used_backup.store(true, Ordering::Relaxed);
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }
}

#[async_trait]
impl MarketDataProvider for FallbackMarketDataProvider {
    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalMetrics, MarketDataError> {
        self.route(symbol, |provider| provider.get_fundamentals(symbol))
            .await
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<PriceHistory, MarketDataError> {
        self.route(symbol, |provider| provider.get_price_history(symbol, range))
            .await
    }
}
