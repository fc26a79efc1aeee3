//! Integration tests for the Yahoo Finance provider

use market_scout::models::{HistoryRange, TickerSymbol};
use market_scout::services::{MarketDataError, MarketDataProvider, YahooMarketDataProvider};
use market_scout::{ScanOrchestrator, Signal, TickerAnalyzer};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quote_summary_body() -> serde_json::Value {
    json!({
        "quoteSummary": {
            "result": [{
                "price": { "shortName": "Apple Inc." },
                "financialData": {
                    "currentPrice": { "raw": 189.5, "fmt": "189.50" },
                    "revenueGrowth": { "raw": 0.25, "fmt": "25.00%" },
                    "profitMargins": { "raw": 0.26, "fmt": "26.00%" }
                },
                "summaryDetail": {
                    "averageVolume": { "raw": 50000000, "fmt": "50M" },
                    "volume": { "raw": 75000000, "fmt": "75M" }
                }
            }],
            "error": null
        }
    })
}

fn chart_body(closes: &[Option<f64>]) -> serde_json::Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL" },
                "timestamp": [],
                "indicators": { "quote": [{ "close": closes }] }
            }],
            "error": null
        }
    })
}

fn provider(server: &MockServer) -> YahooMarketDataProvider {
    YahooMarketDataProvider::with_client(&server.uri(), reqwest::Client::new())
        .expect("valid mock server url")
}

async fn mock_apple(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .and(query_param("modules", "price,financialData,summaryDetail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(quote_summary_body()))
        .mount(server)
        .await;

    // alternating closes with one gap
    let mut closes: Vec<Option<f64>> = (0..20)
        .map(|i| Some(if i % 2 == 0 { 100.0 } else { 101.0 }))
        .collect();
    closes.insert(5, None);
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("range", "3mo"))
        .and(query_param("interval", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(&closes)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fundamentals_are_decoded() {
    let server = MockServer::start().await;
    mock_apple(&server).await;

    let metrics = provider(&server).get_fundamentals("AAPL").await.unwrap();
    assert_eq!(metrics.current_price, Some(189.5));
    assert_eq!(metrics.revenue_growth, Some(0.25));
    assert_eq!(metrics.profit_margin, Some(0.26));
    assert_eq!(metrics.average_volume, 50_000_000);
    assert_eq!(metrics.current_volume, 75_000_000);
    assert_eq!(metrics.short_name.as_deref(), Some("Apple Inc."));
}

#[tokio::test]
async fn price_history_skips_missing_closes() {
    let server = MockServer::start().await;
    mock_apple(&server).await;

    let history = provider(&server)
        .get_price_history("AAPL", HistoryRange::ThreeMonths)
        .await
        .unwrap();
    assert_eq!(history.len(), 20);
    assert_eq!(history.last_close(), Some(101.0));
}

#[tokio::test]
async fn missing_fields_stay_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/TINY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteSummary": {
                "result": [{
                    "financialData": { "currentPrice": { "raw": 3.2 }, "revenueGrowth": {} }
                }],
                "error": null
            }
        })))
        .mount(&server)
        .await;

    let metrics = provider(&server).get_fundamentals("TINY").await.unwrap();
    assert_eq!(metrics.current_price, Some(3.2));
    assert_eq!(metrics.revenue_growth, None);
    assert_eq!(metrics.profit_margin, None);
    assert_eq!(metrics.volume_ratio(), 0.0);
    assert_eq!(metrics.short_name, None);
}

#[tokio::test]
async fn empty_result_is_unknown_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/GONE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteSummary": { "result": [], "error": null }
        })))
        .mount(&server)
        .await;

    let err = provider(&server).get_fundamentals("GONE").await.unwrap_err();
    assert!(matches!(err, MarketDataError::UnknownSymbol(_)));
}

#[tokio::test]
async fn not_found_is_unknown_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/ZZZZ"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = provider(&server).get_fundamentals("ZZZZ").await.unwrap_err();
    assert!(matches!(err, MarketDataError::UnknownSymbol(symbol) if symbol == "ZZZZ"));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = provider(&server).get_fundamentals("AAPL").await.unwrap_err();
    assert!(matches!(err, MarketDataError::RateLimited));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>consent</html>"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .get_price_history("AAPL", HistoryRange::ThreeMonths)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Decode(_)));
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mock_apple(&server).await;

    let metrics = provider(&server)
        .with_retries(2)
        .get_fundamentals("AAPL")
        .await
        .unwrap();
    assert_eq!(metrics.current_price, Some(189.5));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/AAPL"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server)
        .with_retries(3)
        .get_fundamentals("AAPL")
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Status { status: 400, .. }));
}

#[tokio::test]
async fn scan_over_yahoo_skips_failing_tickers() {
    let server = MockServer::start().await;
    mock_apple(&server).await;
    Mock::given(method("GET"))
        .and(path("/v10/finance/quoteSummary/MSFT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let scanner = ScanOrchestrator::new(TickerAnalyzer::new(Arc::new(provider(&server))));
    let universe = vec![TickerSymbol::from("AAPL"), TickerSymbol::from("MSFT")];
    let scan = scanner.run_scan(&universe).await;

    assert_eq!(scan.len(), 1);
    let apple = &scan.results()[0];
    assert_eq!(apple.ticker.as_str(), "AAPL");
    assert_eq!(apple.name, "Apple Inc.");
    // 30 growth + 20 margin + 20 volume + 30 momentum
    assert_eq!(apple.score, 100);
    assert_eq!(apple.signal, Signal::StrongBuy);
}
