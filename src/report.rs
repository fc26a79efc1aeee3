//! Plain-text rendering of a scan for terminals and logs.

use crate::models::{AnalysisResult, ScanResult};
use std::fmt::Write;

const HEADER: &str = "Rank  Ticker  Name        Price      Score  Signal      Growth   Margin   Volume  RSI";

/// Render the ranked table, ranks starting at 1.
pub fn render_table(scan: &ScanResult) -> String {
    if scan.is_empty() {
        return "No tickers produced a usable analysis.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADER);
    for (index, result) in scan.iter().enumerate() {
        let _ = writeln!(out, "{}", render_row(index + 1, result));
    }
    out
}

pub fn render_row(rank: usize, result: &AnalysisResult) -> String {
    format!(
        "{:<4}  {:<6}  {:<10}  {:>9}  {:>5}  {:<10}  {:>7}  {:>7}  {:>6}  {:>5}",
        rank,
        result.ticker.as_str(),
        result.name,
        format_price(result.price),
        result.score,
        result.signal.label(),
        format_percent(result.growth),
        format_percent(result.margin),
        format_ratio(result.volume_ratio),
        format_rsi(result.rsi),
    )
}

/// Scoring guide printed under the table.
pub fn legend() -> &'static str {
    "Score: 80+ Strong Buy, 60-79 Buy, 21-59 Hold, 20 or less Sell\n\
     RSI: 40-60 healthy entry zone, above 80 overbought\n"
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn format_ratio(ratio: f64) -> String {
    format!("{:.1}x", ratio)
}

pub fn format_rsi(rsi: Option<f64>) -> String {
    rsi.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}
