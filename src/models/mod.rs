//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod market;
pub mod signal;

pub use analysis::{AnalysisResult, ScanResult, ScoreBreakdown};
pub use market::{FundamentalMetrics, HistoryRange, PriceHistory, TickerSymbol};
pub use signal::Signal;
