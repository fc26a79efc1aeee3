//! Market Scout: equity screening engine.
//!
//! Turns per-ticker fundamentals and a trailing price history into a composite
//! score, a discrete [`Signal`](models::Signal) and a ranked scan across a
//! ticker universe.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod scanner;
pub mod services;
pub mod signals;
pub mod universe;

pub use models::{AnalysisResult, ScanResult, Signal};
pub use scanner::{ScanOrchestrator, TickerAnalyzer};
