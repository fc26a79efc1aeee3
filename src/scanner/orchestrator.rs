//! Universe-wide scan.

use crate::config::ScanConfig;
use crate::metrics::Metrics;
use crate::models::{AnalysisResult, ScanResult, TickerSymbol};
use crate::scanner::analyzer::TickerAnalyzer;
use crate::services::market_data::MarketDataProvider;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub struct ScanOrchestrator {
    analyzer: TickerAnalyzer,
    concurrency: usize,
    metrics: Option<Arc<Metrics>>,
}

impl ScanOrchestrator {
    pub fn new(analyzer: TickerAnalyzer) -> Self {
        Self {
            analyzer,
            concurrency: 1,
            metrics: None,
        }
    }

    /// Build an orchestrator over `provider` using the scan settings.
    pub fn from_config(provider: Arc<dyn MarketDataProvider>, config: &ScanConfig) -> Self {
        let analyzer = TickerAnalyzer::new(provider)
            .with_history_range(config.history_range)
            .with_timeout(config.provider_timeout);
        Self::new(analyzer).with_concurrency(config.concurrency)
    }

    /// Analyse up to `concurrency` tickers at once (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Analyse every ticker in `universe` and rank the survivors by score.
    ///
    /// Failed tickers are omitted. An empty result is a valid outcome.
    pub async fn run_scan(&self, universe: &[TickerSymbol]) -> ScanResult {
        let start = Instant::now();

        // `buffered` yields in universe order regardless of completion order
        // owned symbols keep the scan future `Send` for spawned callers
        let outcomes: Vec<Option<AnalysisResult>> = stream::iter(universe.iter().cloned())
            .map(|symbol| async move { self.analyzer.analyze(&symbol).await })
            .buffered(self.concurrency)
            .collect()
            .await;

        let results: Vec<AnalysisResult> = outcomes.into_iter().flatten().collect();
        let failed = universe.len() - results.len();
        let scan = ScanResult::ranked(results);
        let elapsed = start.elapsed();

        if let Some(metrics) = &self.metrics {
            metrics.record_scan(scan.len(), failed, elapsed);
        }

        info!(
            universe = universe.len(),
            ranked = scan.len(),
            failed = failed,
            duration_ms = elapsed.as_millis() as u64,
            "Scan complete: {} of {} tickers ranked",
            scan.len(),
            universe.len()
        );

        scan
    }
}
