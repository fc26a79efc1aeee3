//! RSI (Relative Strength Index) indicator

use crate::common::math;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI returned when there is no price history, or no losses in the window.
pub const NEUTRAL_RSI: f64 = 50.0;

/// An RSI reading. `None` is a non-numeric RSI: the rolling window is not yet
/// defined.
pub type RsiValue = Option<f64>;

/// Calculate RSI with the default period (14)
pub fn calculate_rsi(closes: &[f64]) -> RsiValue {
    calculate_rsi_with_period(closes, DEFAULT_RSI_PERIOD)
}

/// Calculate RSI over the most recent `period` day-over-day changes
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn calculate_rsi_with_period(closes: &[f64], period: usize) -> RsiValue {
    if closes.is_empty() {
        return Some(NEUTRAL_RSI);
    }

    let deltas = math::deltas(closes);
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let avg_gain = math::sma(&gains, period)?;
    let avg_loss = math::sma(&losses, period)?;

    // RS is unbounded without losses; the reading stays neutral
    if avg_loss == 0.0 {
        return Some(NEUTRAL_RSI);
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.is_finite().then_some(rsi)
}
