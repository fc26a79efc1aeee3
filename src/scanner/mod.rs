//! Per-ticker analysis and universe-wide ranking.

pub mod analyzer;
pub mod orchestrator;

pub use analyzer::{AnalysisError, TickerAnalyzer};
pub use orchestrator::ScanOrchestrator;
