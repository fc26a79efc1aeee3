//! Environment-driven configuration.
//!
//! Values are read from the process environment after an optional `.env` has
//! been loaded by the binary. Malformed numbers fall back to their defaults.

use crate::models::{HistoryRange, TickerSymbol};
use crate::universe;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Deployment environment name (`APP_ENV`), `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}

#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    /// Second host tried when a call to `base_url` fails.
    pub backup_base_url: Option<String>,
    pub cookie: Option<String>,
    pub crumb: Option<String>,
    pub retries: usize,
    pub request_timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            backup_base_url: None,
            cookie: None,
            crumb: None,
            retries: 2,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Scan settings shared by every binary.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub universe: Vec<TickerSymbol>,
    pub history_range: HistoryRange,
    /// Upper bound for each provider call made while analysing a ticker,
    /// retries included.
    pub provider_timeout: Duration,
    /// Tickers analysed at once; `1` processes the universe strictly in order.
    pub concurrency: usize,
    pub yahoo: YahooConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let yahoo = YahooConfig::default();
        Self {
            universe: universe::default_universe(),
            history_range: HistoryRange::default(),
            provider_timeout: call_budget(&yahoo),
            concurrency: 1,
            yahoo,
        }
    }
}

/// Time one provider call may take: every attempt at the full request
/// timeout plus one more for backoff, on each configured host.
pub fn call_budget(yahoo: &YahooConfig) -> Duration {
    let attempts = (yahoo.retries as u32).saturating_add(2);
    let hosts = if yahoo.backup_base_url.is_some() { 2 } else { 1 };
    yahoo.request_timeout.saturating_mul(attempts.saturating_mul(hosts))
}

impl ScanConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let universe = match env::var("SCOUT_UNIVERSE") {
            Ok(list) if !list.trim().is_empty() => universe::parse_universe(&list),
            _ => defaults.universe,
        };

        let history_range = match env::var("SCOUT_HISTORY_RANGE") {
            Ok(raw) => HistoryRange::from_str(&raw).map_err(|message| ConfigError::Invalid {
                key: "SCOUT_HISTORY_RANGE",
                message,
            })?,
            Err(_) => defaults.history_range,
        };

        let request_timeout = Duration::from_millis(parse_or(
            "SCOUT_PROVIDER_TIMEOUT_MS",
            defaults.yahoo.request_timeout.as_millis() as u64,
        ));
        let concurrency = parse_or("SCOUT_SCAN_CONCURRENCY", defaults.concurrency).max(1);

        let yahoo = YahooConfig {
            base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo.base_url),
            backup_base_url: env::var("YAHOO_BACKUP_BASE_URL").ok().filter(|v| !v.is_empty()),
            cookie: env::var("YAHOO_COOKIE").ok().filter(|v| !v.is_empty()),
            crumb: env::var("YAHOO_CRUMB").ok().filter(|v| !v.is_empty()),
            retries: parse_or("SCOUT_PROVIDER_RETRIES", defaults.yahoo.retries),
            request_timeout,
        };
        let provider_timeout = call_budget(&yahoo);

        Ok(Self {
            universe,
            history_range,
            provider_timeout,
            concurrency,
            yahoo,
        })
    }
}

/// Port for the API server (`PORT`, default 8080).
pub fn get_port() -> u16 {
    parse_or("PORT", 8080)
}

/// Worker rescan cadence (`SCAN_INTERVAL_SECONDS`, 0 = disabled).
pub fn get_scan_interval_seconds() -> u64 {
    parse_or("SCAN_INTERVAL_SECONDS", 0)
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, default = %default, "Ignoring malformed setting");
            default
        }),
        Err(_) => default,
    }
}
