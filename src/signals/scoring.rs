//! Additive multi-factor scoring.
//!
//! Each rule contributes a fixed number of points when its condition holds and
//! nothing otherwise. Absent metrics and a non-numeric RSI never satisfy a
//! condition. The sum is not normalised or clamped.

use crate::indicators::RsiValue;
use crate::models::{FundamentalMetrics, ScoreBreakdown};

/// Rule thresholds and point values
pub struct ScoringRules;

impl ScoringRules {
    pub const STRONG_GROWTH: f64 = 0.20;
    pub const MODERATE_GROWTH: f64 = 0.10;
    pub const HIGH_MARGIN: f64 = 0.20;
    pub const UNUSUAL_VOLUME: f64 = 1.20;
    pub const RSI_BUY_ZONE: (f64, f64) = (40.0, 60.0);
    pub const RSI_OVERBOUGHT: f64 = 80.0;

    pub const STRONG_GROWTH_POINTS: i32 = 30;
    pub const MODERATE_GROWTH_POINTS: i32 = 15;
    pub const HIGH_MARGIN_POINTS: i32 = 20;
    pub const UNUSUAL_VOLUME_POINTS: i32 = 20;
    pub const RSI_BUY_ZONE_POINTS: i32 = 30;
    pub const RSI_OVERBOUGHT_POINTS: i32 = -20;
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a ticker from its fundamentals, volume ratio and RSI.
    pub fn score(metrics: &FundamentalMetrics, volume_ratio: f64, rsi: RsiValue) -> ScoreBreakdown {
        let growth_points = Self::growth_points(metrics.revenue_growth);
        let margin_points = Self::margin_points(metrics.profit_margin);
        let volume_points = Self::volume_points(volume_ratio);
        let momentum_points = Self::momentum_points(rsi);

        ScoreBreakdown {
            score: growth_points + margin_points + volume_points + momentum_points,
            growth_points,
            margin_points,
            volume_points,
            momentum_points,
            volume_ratio,
            rsi,
        }
    }

    fn growth_points(revenue_growth: Option<f64>) -> i32 {
        match revenue_growth {
            Some(g) if g > ScoringRules::STRONG_GROWTH => ScoringRules::STRONG_GROWTH_POINTS,
            Some(g) if g > ScoringRules::MODERATE_GROWTH => ScoringRules::MODERATE_GROWTH_POINTS,
            _ => 0,
        }
    }

    fn margin_points(profit_margin: Option<f64>) -> i32 {
        match profit_margin {
            Some(m) if m > ScoringRules::HIGH_MARGIN => ScoringRules::HIGH_MARGIN_POINTS,
            _ => 0,
        }
    }

    fn volume_points(volume_ratio: f64) -> i32 {
        if volume_ratio > ScoringRules::UNUSUAL_VOLUME {
            ScoringRules::UNUSUAL_VOLUME_POINTS
        } else {
            0
        }
    }

    fn momentum_points(rsi: RsiValue) -> i32 {
        let Some(rsi) = rsi else {
            return 0;
        };
        let (low, high) = ScoringRules::RSI_BUY_ZONE;
        let mut points = 0;
        if (low..=high).contains(&rsi) {
            points += ScoringRules::RSI_BUY_ZONE_POINTS;
        }
        if rsi > ScoringRules::RSI_OVERBOUGHT {
            points += ScoringRules::RSI_OVERBOUGHT_POINTS;
        }
        points
    }
}
