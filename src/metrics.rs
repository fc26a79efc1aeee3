//! Prometheus metrics for scans and the HTTP API.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::time::Duration;

pub struct Metrics {
    registry: Registry,
    pub scans_total: IntCounter,
    pub tickers_analyzed_total: IntCounter,
    pub tickers_failed_total: IntCounter,
    pub last_scan_ranked: IntGauge,
    pub scan_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::new("scans_total", "Completed universe scans")?;
        let tickers_analyzed_total =
            IntCounter::new("tickers_analyzed_total", "Tickers that produced an analysis result")?;
        let tickers_failed_total =
            IntCounter::new("tickers_failed_total", "Tickers omitted because analysis failed")?;
        let last_scan_ranked =
            IntGauge::new("last_scan_ranked", "Tickers ranked by the most recent scan")?;
        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall time of a full scan")
                .buckets(vec![0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0]),
        )?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(tickers_analyzed_total.clone()))?;
        registry.register(Box::new(tickers_failed_total.clone()))?;
        registry.register(Box::new(last_scan_ranked.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            tickers_analyzed_total,
            tickers_failed_total,
            last_scan_ranked,
            scan_duration_seconds,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    pub fn record_scan(&self, ranked: usize, failed: usize, elapsed: Duration) {
        self.scans_total.inc();
        self.tickers_analyzed_total.inc_by(ranked as u64);
        self.tickers_failed_total.inc_by(failed as u64);
        self.last_scan_ranked.set(ranked as i64);
        self.scan_duration_seconds.observe(elapsed.as_secs_f64());
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
