//! Yahoo Finance response payloads.
//!
//! Only the fields the screener consumes are modelled; everything else in the
//! payloads is ignored.

use crate::models::{FundamentalMetrics, PriceHistory};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryData {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub financial_data: Option<FinancialDataModule>,
    #[serde(default)]
    pub summary_detail: Option<SummaryDetailModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDataModule {
    #[serde(default)]
    pub current_price: Option<RawValue>,
    #[serde(default)]
    pub revenue_growth: Option<RawValue>,
    #[serde(default)]
    pub profit_margins: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetailModule {
    #[serde(default)]
    pub average_volume: Option<RawValue>,
    #[serde(default)]
    pub volume: Option<RawValue>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; missing values come
/// back as `{}`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub raw: Option<f64>,
}

fn raw(value: &Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw).filter(|v| v.is_finite())
}

fn raw_volume(value: &Option<RawValue>) -> u64 {
    raw(value).filter(|v| *v >= 0.0).map(|v| v as u64).unwrap_or(0)
}

impl From<QuoteSummaryResult> for FundamentalMetrics {
    fn from(result: QuoteSummaryResult) -> Self {
        let financial = result.financial_data.unwrap_or_default();
        let detail = result.summary_detail.unwrap_or_default();
        FundamentalMetrics {
            current_price: raw(&financial.current_price),
            revenue_growth: raw(&financial.revenue_growth),
            profit_margin: raw(&financial.profit_margins),
            average_volume: raw_volume(&detail.average_volume),
            current_volume: raw_volume(&detail.volume),
            short_name: result.price.and_then(|p| p.short_name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub indicators: Option<ChartIndicators>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl From<ChartResult> for PriceHistory {
    fn from(result: ChartResult) -> Self {
        // sessions without a close (halts, partial days) are skipped
        let closes = result
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .map(|q| q.close.into_iter().flatten().filter(|c| c.is_finite()).collect())
            .unwrap_or_default();
        PriceHistory::new(closes)
    }
}
