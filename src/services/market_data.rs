//! Market data provider interface.
//!
//! Providers are unreliable by contract: any call may fail and any field of a
//! snapshot may be missing.

use crate::models::{FundamentalMetrics, HistoryRange, PriceHistory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("rate limited by provider")]
    RateLimited,
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),
    #[error("failed to decode provider response: {0}")]
    Decode(String),
    #[error("provider error: {0}")]
    Provider(String),
}

impl MarketDataError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Transport(_) | MarketDataError::RateLimited => true,
            MarketDataError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MarketDataError::Decode(err.to_string())
        } else {
            MarketDataError::Transport(err.to_string())
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the current fundamentals snapshot for a symbol
    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalMetrics, MarketDataError>;

    /// Get daily closing prices for a symbol over the trailing `range`
    async fn get_price_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<PriceHistory, MarketDataError>;
}

#[derive(Debug, Clone)]
struct Snapshot {
    fundamentals: FundamentalMetrics,
    history: PriceHistory,
}

/// Provider serving fixed snapshots from memory.
///
/// Unknown symbols fail with [`MarketDataError::UnknownSymbol`]. Failures and
/// delays can be injected per symbol.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketDataProvider {
    snapshots: HashMap<String, Snapshot>,
    failures: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(
        mut self,
        symbol: &str,
        fundamentals: FundamentalMetrics,
        history: impl Into<PriceHistory>,
    ) -> Self {
        self.snapshots.insert(
            symbol.to_string(),
            Snapshot {
                fundamentals,
                history: history.into(),
            },
        );
        self
    }

    /// Make every call for `symbol` fail with `message`.
    pub fn with_failure(mut self, symbol: &str, message: &str) -> Self {
        self.failures.insert(symbol.to_string(), message.to_string());
        self
    }

    /// Delay every call for `symbol`.
    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    async fn lookup(&self, symbol: &str) -> Result<&Snapshot, MarketDataError> {
        if let Some(delay) = self.delays.get(symbol) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.failures.get(symbol) {
            return Err(MarketDataError::Provider(message.clone()));
        }
        self.snapshots
            .get(symbol)
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalMetrics, MarketDataError> {
        Ok(self.lookup(symbol).await?.fundamentals.clone())
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        _range: HistoryRange,
    ) -> Result<PriceHistory, MarketDataError> {
        Ok(self.lookup(symbol).await?.history.clone())
    }
}
