//! Per-ticker analysis output and the ranked scan result.

use serde::{Deserialize, Serialize};

use super::market::TickerSymbol;
use super::signal::Signal;

/// Composite score plus the intermediate inputs used to compute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: i32,
    pub growth_points: i32,
    pub margin_points: i32,
    pub volume_points: i32,
    pub momentum_points: i32,
    pub volume_ratio: f64,
    pub rsi: Option<f64>,
}

/// Output record for one ticker. Lives for one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: TickerSymbol,
    pub name: String,
    pub price: f64,
    pub score: i32,
    pub signal: Signal,
    pub growth: f64,
    pub margin: f64,
    pub volume_ratio: f64,
    /// `None` when the RSI was not numeric (insufficient history).
    pub rsi: Option<f64>,
}

/// Analysis results ranked by score, highest first.
///
/// Ties keep universe order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResult {
    results: Vec<AnalysisResult>,
}

impl ScanResult {
    /// Rank `results`, which must be in universe order.
    pub fn ranked(mut results: Vec<AnalysisResult>) -> Self {
        // `sort_by` is stable, so equal scores stay in universe order
        results.sort_by(|a, b| b.score.cmp(&a.score));
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisResult> {
        self.results.iter()
    }

    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn top(&self, n: usize) -> &[AnalysisResult] {
        &self.results[..n.min(self.results.len())]
    }

    pub fn into_inner(self) -> Vec<AnalysisResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a AnalysisResult;
    type IntoIter = std::slice::Iter<'a, AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
