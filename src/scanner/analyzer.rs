//! Single-ticker analysis.
//!
//! [`TickerAnalyzer::analyze`] is a total failure boundary: provider errors,
//! unusable prices, timeouts and panics all end in `None` for that ticker and
//! never reach the caller.

use crate::indicators::calculate_rsi;
use crate::models::{AnalysisResult, HistoryRange, TickerSymbol};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::signals::{classify, ScoringEngine};
use futures_util::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Display names are cut to this many characters.
pub const NAME_WIDTH: usize = 10;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] MarketDataError),
    #[error("no usable current price")]
    NoUsablePrice,
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("analysis panicked: {0}")]
    Panicked(String),
}

pub struct TickerAnalyzer {
    provider: Arc<dyn MarketDataProvider>,
    history_range: HistoryRange,
    timeout: Duration,
}

impl TickerAnalyzer {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            history_range: HistoryRange::default(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_history_range(mut self, history_range: HistoryRange) -> Self {
        self.history_range = history_range;
        self
    }

    /// Bound every provider call; an expired call fails the ticker.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyse one ticker, returning `None` on any failure.
    pub async fn analyze(&self, symbol: &TickerSymbol) -> Option<AnalysisResult> {
        match self.try_analyze(symbol).await {
            Ok(result) => {
                debug!(
                    symbol = %symbol,
                    score = result.score,
                    signal = %result.signal,
                    "Ticker analysed"
                );
                Some(result)
            }
            Err(AnalysisError::Panicked(message)) => {
                warn!(symbol = %symbol, error = %message, "Ticker analysis panicked, skipping");
                None
            }
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "Ticker skipped");
                None
            }
        }
    }

    /// Analyse one ticker, reporting why it failed.
    pub async fn try_analyze(&self, symbol: &TickerSymbol) -> Result<AnalysisResult, AnalysisError> {
        AssertUnwindSafe(self.analyze_inner(symbol))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(AnalysisError::Panicked(panic_message(payload))))
    }

    async fn analyze_inner(&self, symbol: &TickerSymbol) -> Result<AnalysisResult, AnalysisError> {
        let metrics = self
            .bounded(self.provider.get_fundamentals(symbol.as_str()))
            .await?;
        let price = metrics.usable_price().ok_or(AnalysisError::NoUsablePrice)?;

        let history = self
            .bounded(self.provider.get_price_history(symbol.as_str(), self.history_range))
            .await?;

        let volume_ratio = metrics.volume_ratio();
        let rsi = calculate_rsi(history.closes());
        let breakdown = ScoringEngine::score(&metrics, volume_ratio, rsi);

        let name = metrics
            .short_name
            .as_deref()
            .unwrap_or(symbol.as_str())
            .chars()
            .take(NAME_WIDTH)
            .collect();

        Ok(AnalysisResult {
            ticker: symbol.clone(),
            name,
            price,
            score: breakdown.score,
            signal: classify(breakdown.score),
            growth: metrics.revenue_growth.unwrap_or(0.0),
            margin: metrics.profit_margin.unwrap_or(0.0),
            volume_ratio,
            rsi,
        })
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, MarketDataError>>,
    ) -> Result<T, AnalysisError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| AnalysisError::Timeout(self.timeout))?
            .map_err(AnalysisError::from)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
