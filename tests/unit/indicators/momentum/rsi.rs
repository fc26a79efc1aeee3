//! Unit tests for RSI indicator

use approx::assert_relative_eq;
use market_scout::indicators::{calculate_rsi, calculate_rsi_with_period};

use crate::fixtures::{neutral_history, overbought_history, rising_history};

#[test]
fn test_rsi_empty_history_is_neutral() {
    assert_eq!(calculate_rsi(&[]), Some(50.0));
}

#[test]
fn test_rsi_insufficient_history_is_non_numeric() {
    assert_eq!(calculate_rsi(&[100.0]), None);
    // 14 closes give only 13 changes
    let closes: Vec<f64> = neutral_history().into_iter().take(14).collect();
    assert_eq!(calculate_rsi(&closes), None);
}

#[test]
fn test_rsi_balanced_moves() {
    let rsi = calculate_rsi(&neutral_history()).unwrap();
    assert_relative_eq!(rsi, 50.0, epsilon = 1e-9);
}

#[test]
fn test_rsi_mixed_moves() {
    // 10 gains of 1.0 and 4 losses of 1.0: RS = 2.5
    let mut closes = vec![100.0];
    for i in 0..14 {
        let last = *closes.last().unwrap();
        closes.push(if i < 10 { last + 1.0 } else { last - 1.0 });
    }
    let rsi = calculate_rsi(&closes).unwrap();
    assert_relative_eq!(rsi, 100.0 - 100.0 / 3.5, epsilon = 1e-9);
}

#[test]
fn test_rsi_overbought_series() {
    let rsi = calculate_rsi(&overbought_history()).unwrap();
    assert_relative_eq!(rsi, 100.0 - 100.0 / 27.0, epsilon = 1e-9);
    assert!(rsi > 80.0);
}

#[test]
fn test_rsi_without_losses_is_neutral() {
    assert_eq!(calculate_rsi(&rising_history()), Some(50.0));
    assert_eq!(calculate_rsi(&[5.0; 20]), Some(50.0));
}

#[test]
fn test_rsi_window_needs_fifteen_closes() {
    let closes: Vec<f64> = (0..15).map(|i| 200.0 - i as f64).collect();
    assert_eq!(calculate_rsi(&closes[..14]), None);
    assert_eq!(calculate_rsi(&closes), Some(0.0));
}

#[test]
fn test_rsi_only_losses_is_zero() {
    let closes: Vec<f64> = (0..20).map(|i| 200.0 - i as f64).collect();
    assert_eq!(calculate_rsi(&closes), Some(0.0));
}

#[test]
fn test_rsi_custom_period() {
    assert_eq!(calculate_rsi_with_period(&[1.0, 2.0, 1.0], 2), Some(50.0));
    assert_eq!(calculate_rsi_with_period(&[1.0, 2.0], 2), None);
}
