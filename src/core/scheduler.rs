//! Cron-based scheduler for periodic universe rescans
//!
//! Every tick runs an independent full scan; nothing is carried between ticks.

use crate::models::TickerSymbol;
use crate::scanner::ScanOrchestrator;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Results logged per tick
const TOP_RESULTS: usize = 5;

/// Convert an interval to a six-field cron expression (with seconds).
pub fn interval_to_cron(interval_seconds: u64) -> String {
    if interval_seconds >= 60 {
        format!("0 */{} * * * *", interval_seconds / 60)
    } else {
        format!("*/{} * * * * *", interval_seconds)
    }
}

pub struct ScanScheduler {
    scanner: Arc<ScanOrchestrator>,
    universe: Arc<Vec<TickerSymbol>>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `scanner` - Orchestrator used for every rescan
    /// * `universe` - Tickers to scan
    /// * `interval_seconds` - Rescan interval in seconds (0 = disabled)
    pub fn new(
        scanner: Arc<ScanOrchestrator>,
        universe: Vec<TickerSymbol>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            return Err("Scheduler disabled: interval_seconds is 0".into());
        }

        let cron_expr = interval_to_cron(interval_seconds);
        let schedule = Schedule::from_str(&cron_expr)
            .map_err(|e| format!("Invalid cron expression '{}': {}", cron_expr, e))?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            tickers = universe.len(),
            "ScanScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            scanner,
            universe: Arc::new(universe),
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let scanner = self.scanner.clone();
        let universe = self.universe.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, waiting for cron schedule...");

            loop {
                let next_tick = schedule.upcoming(chrono::Utc).next();
                match next_tick {
                    Some(next_tick) => {
                        let now = chrono::Utc::now();
                        if next_tick > now {
                            let duration = (next_tick - now).to_std().unwrap_or_default();
                            tokio::time::sleep(duration).await;
                        }
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                info!(tickers = universe.len(), "ScanScheduler: cron tick, rescanning universe");
                let scan = scanner.run_scan(&universe).await;

                if scan.is_empty() {
                    warn!("ScanScheduler: no ticker produced a usable analysis");
                    continue;
                }
                for (rank, result) in scan.top(TOP_RESULTS).iter().enumerate() {
                    info!(
                        rank = rank + 1,
                        symbol = %result.ticker,
                        score = result.score,
                        signal = %result.signal,
                        "ScanScheduler: #{} {} scored {} ({})",
                        rank + 1,
                        result.ticker,
                        result.score,
                        result.signal
                    );
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("ScanScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
