//! Score to signal mapping.

use crate::models::Signal;

pub const STRONG_BUY_MIN: i32 = 80;
pub const BUY_MIN: i32 = 60;
pub const SELL_MAX: i32 = 20;

/// Map a composite score to a [`Signal`].
///
/// Checked in order: strong buy, buy, sell, then hold for everything else.
pub fn classify(score: i32) -> Signal {
    if score >= STRONG_BUY_MIN {
        Signal::StrongBuy
    } else if score >= BUY_MIN {
        Signal::Buy
    } else if score <= SELL_MAX {
        Signal::Sell
    } else {
        Signal::Hold
    }
}
