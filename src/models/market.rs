//! Market snapshot models produced by a market data provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier selecting one instrument in the universe (e.g. `NVDA`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TickerSymbol {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl From<String> for TickerSymbol {
    fn from(symbol: String) -> Self {
        Self(symbol)
    }
}

/// Per-ticker fundamentals snapshot. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    /// Signed fraction, `0.25` means +25% year over year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<f64>,
    /// Signed fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(default)]
    pub average_volume: u64,
    #[serde(default)]
    pub current_volume: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

impl FundamentalMetrics {
    pub fn new(current_price: f64) -> Self {
        Self {
            current_price: Some(current_price),
            ..Self::default()
        }
    }

    pub fn with_revenue_growth(mut self, revenue_growth: f64) -> Self {
        self.revenue_growth = Some(revenue_growth);
        self
    }

    pub fn with_profit_margin(mut self, profit_margin: f64) -> Self {
        self.profit_margin = Some(profit_margin);
        self
    }

    pub fn with_volumes(mut self, current_volume: u64, average_volume: u64) -> Self {
        self.current_volume = current_volume;
        self.average_volume = average_volume;
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// The current price when it is usable for analysis (finite and > 0).
    pub fn usable_price(&self) -> Option<f64> {
        self.current_price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Current volume over the trading-day average, `0.0` without an average.
    pub fn volume_ratio(&self) -> f64 {
        if self.average_volume > 0 {
            self.current_volume as f64 / self.average_volume as f64
        } else {
            0.0
        }
    }
}

/// Daily closing prices ordered oldest to newest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceHistory {
    closes: Vec<f64>,
}

impl PriceHistory {
    pub fn new(closes: Vec<f64>) -> Self {
        Self { closes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

impl From<Vec<f64>> for PriceHistory {
    fn from(closes: Vec<f64>) -> Self {
        Self::new(closes)
    }
}

/// Trailing window requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[default]
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl HistoryRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1mo" => Ok(HistoryRange::OneMonth),
            "3mo" => Ok(HistoryRange::ThreeMonths),
            "6mo" => Ok(HistoryRange::SixMonths),
            "1y" => Ok(HistoryRange::OneYear),
            other => Err(format!("unsupported history range '{}'", other)),
        }
    }
}
