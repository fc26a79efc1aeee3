//! Moving-average helpers used by the indicators.

/// Simple moving average of the last `period` values.
///
/// Returns `None` when fewer than `period` values are available, mirroring an
/// undefined rolling window.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Day-over-day differences: `out[i] = values[i + 1] - values[i]`.
pub fn deltas(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}
