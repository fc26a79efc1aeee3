//! Unit tests for composite scoring

use market_scout::models::FundamentalMetrics;
use market_scout::signals::{classify, ScoringEngine};
use market_scout::Signal;

fn growth_only(growth: f64) -> FundamentalMetrics {
    FundamentalMetrics::new(10.0).with_revenue_growth(growth)
}

#[test]
fn test_growth_tiers_are_exclusive() {
    assert_eq!(ScoringEngine::score(&growth_only(0.25), 0.0, None).growth_points, 30);
    assert_eq!(ScoringEngine::score(&growth_only(0.15), 0.0, None).growth_points, 15);
    assert_eq!(ScoringEngine::score(&growth_only(0.05), 0.0, None).growth_points, 0);
    assert_eq!(ScoringEngine::score(&growth_only(-0.40), 0.0, None).growth_points, 0);
}

#[test]
fn test_thresholds_are_strict() {
    assert_eq!(ScoringEngine::score(&growth_only(0.20), 0.0, None).growth_points, 15);
    assert_eq!(ScoringEngine::score(&growth_only(0.10), 0.0, None).growth_points, 0);

    let margin = FundamentalMetrics::new(10.0).with_profit_margin(0.20);
    assert_eq!(ScoringEngine::score(&margin, 0.0, None).margin_points, 0);

    let none = FundamentalMetrics::new(10.0);
    assert_eq!(ScoringEngine::score(&none, 1.20, None).volume_points, 0);
    assert_eq!(ScoringEngine::score(&none, 1.21, None).volume_points, 20);
}

#[test]
fn test_all_rules_firing() {
    let metrics = FundamentalMetrics::new(10.0)
        .with_revenue_growth(0.3)
        .with_profit_margin(0.25);
    let breakdown = ScoringEngine::score(&metrics, 1.5, Some(50.0));

    assert_eq!(breakdown.score, 100);
    assert_eq!(breakdown.growth_points, 30);
    assert_eq!(breakdown.margin_points, 20);
    assert_eq!(breakdown.volume_points, 20);
    assert_eq!(breakdown.momentum_points, 30);
    assert_eq!(breakdown.volume_ratio, 1.5);
    assert_eq!(breakdown.rsi, Some(50.0));
    assert_eq!(classify(breakdown.score), Signal::StrongBuy);
}

#[test]
fn test_absent_fundamentals_with_neutral_rsi() {
    let metrics = FundamentalMetrics::new(10.0);
    assert_eq!(metrics.volume_ratio(), 0.0);

    let breakdown = ScoringEngine::score(&metrics, metrics.volume_ratio(), Some(50.0));
    assert_eq!(breakdown.score, 30);
    assert_eq!(classify(breakdown.score), Signal::Hold);
}

#[test]
fn test_overbought_penalty() {
    let breakdown = ScoringEngine::score(&FundamentalMetrics::default(), 0.0, Some(85.0));
    assert_eq!(breakdown.score, -20);
    assert_eq!(classify(breakdown.score), Signal::Sell);
}

#[test]
fn test_momentum_band_edges() {
    let metrics = FundamentalMetrics::default();
    assert_eq!(ScoringEngine::score(&metrics, 0.0, Some(40.0)).momentum_points, 30);
    assert_eq!(ScoringEngine::score(&metrics, 0.0, Some(60.0)).momentum_points, 30);
    assert_eq!(ScoringEngine::score(&metrics, 0.0, Some(39.9)).momentum_points, 0);
    assert_eq!(ScoringEngine::score(&metrics, 0.0, Some(70.0)).momentum_points, 0);
    assert_eq!(ScoringEngine::score(&metrics, 0.0, Some(80.0)).momentum_points, 0);
}

#[test]
fn test_non_numeric_rsi_contributes_nothing() {
    let breakdown = ScoringEngine::score(&FundamentalMetrics::default(), 0.0, None);
    assert_eq!(breakdown.momentum_points, 0);
    assert_eq!(breakdown.score, 0);
}

#[test]
fn test_negative_fundamentals_score_nothing() {
    let metrics = FundamentalMetrics::new(10.0)
        .with_revenue_growth(-0.5)
        .with_profit_margin(-0.3);
    assert_eq!(ScoringEngine::score(&metrics, 0.5, None).score, 0);
}

#[test]
fn test_volume_ratio_from_snapshot() {
    let metrics = FundamentalMetrics::new(10.0).with_volumes(300, 200);
    assert_eq!(metrics.volume_ratio(), 1.5);
    let no_average = FundamentalMetrics::new(10.0).with_volumes(300, 0);
    assert_eq!(no_average.volume_ratio(), 0.0);
}
