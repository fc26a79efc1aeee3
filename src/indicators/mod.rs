//! Technical indicators computed from price history.

pub mod momentum;

pub use momentum::rsi::{calculate_rsi, calculate_rsi_with_period, RsiValue};
