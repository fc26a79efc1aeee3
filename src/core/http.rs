//! Scan API served with Axum
//!
//! Every `/api/scan` request runs a fresh scan; the only state kept between
//! requests is the health record and the metrics registry.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::ScanConfig;
use crate::metrics::Metrics;
use crate::models::{AnalysisResult, TickerSymbol};
use crate::scanner::ScanOrchestrator;
use crate::services::build_provider;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub scanner: Arc<ScanOrchestrator>,
    pub universe: Arc<Vec<TickerSymbol>>,
}

/// Liveness plus a summary of the most recent scan served.
#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub last_scan_at: Option<DateTime<Utc>>,
    pub last_scan_ranked: Option<usize>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            last_scan_at: None,
            last_scan_ranked: None,
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let health = state.health.read().await;
    Json(json!({
        "status": health.status,
        "service": "market-scout",
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "universe_size": state.universe.len(),
        "last_scan_at": health.last_scan_at,
        "last_scan_ranked": health.last_scan_ranked,
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state.metrics.export().map_err(|e| {
        error!(error = %e, "Failed to encode metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Count, time and gauge every request passing through the router.
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let timer = state.metrics.http_request_duration_seconds.start_timer();
    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    let elapsed = timer.stop_and_record();

    if response.status().is_server_error() {
        error!(
            path = %path,
            status = %response.status(),
            duration_ms = (elapsed * 1000.0) as u64,
            "Request failed"
        );
    }
    response
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    /// Keep only the top `limit` results.
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub scanned_at: DateTime<Utc>,
    pub universe_size: usize,
    pub ranked: usize,
    pub results: Vec<AnalysisResult>,
}

async fn list_universe(State(state): State<AppState>) -> Json<Vec<TickerSymbol>> {
    Json(state.universe.as_ref().clone())
}

/// Run a fresh scan of the configured universe
async fn run_scan(
    State(state): State<AppState>,
    Query(params): Query<ScanQuery>,
) -> Json<ScanResponse> {
    let scan = state.scanner.run_scan(&state.universe).await;
    let scanned_at = Utc::now();
    let ranked = scan.len();
    {
        let mut health = state.health.write().await;
        health.last_scan_at = Some(scanned_at);
        health.last_scan_ranked = Some(ranked);
    }

    let mut results = scan.into_inner();
    if let Some(limit) = params.limit {
        results.truncate(limit);
    }

    Json(ScanResponse {
        scanned_at,
        universe_size: state.universe.len(),
        ranked,
        results,
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/universe", get(list_universe))
        .route("/api/scan", get(run_scan))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(state.clone(), track_requests))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, config: ScanConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = build_provider(&config)?;
    let scanner = ScanOrchestrator::from_config(provider, &config).with_metrics(metrics.clone());

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        scanner: Arc::new(scanner),
        universe: Arc::new(config.universe),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
