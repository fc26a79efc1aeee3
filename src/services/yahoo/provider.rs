//! Yahoo Finance market data provider implementation

use crate::config::YahooConfig;
use crate::models::{FundamentalMetrics, HistoryRange, PriceHistory};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{COOKIE, REFERER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::messages::{ChartResponse, QuoteSummaryResponse};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const SUMMARY_MODULES: &str = "price,financialData,summaryDetail";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: Url,
    cookie: Option<String>,
    crumb: Option<String>,
    retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new(config: &YahooConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;
        let mut provider = Self::with_client(&config.base_url, client)?;
        provider.cookie = config.cookie.clone();
        provider.crumb = config.crumb.clone();
        provider.retries = config.retries;
        Ok(provider)
    }

    /// Build a provider around an existing HTTP client, without credentials.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, MarketDataError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MarketDataError::Provider(format!("invalid base url '{}': {}", base_url, e)))?;
        Ok(Self {
            client,
            base_url,
            cookie: None,
            crumb: None,
            retries: 0,
        })
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MarketDataError::Provider(format!("base url '{}' cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(crumb) = &self.crumb {
                pairs.append_pair("crumb", crumb);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, symbol: &str) -> Result<T, MarketDataError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(200))
            .with_max_times(self.retries);

        (|| self.send_once::<T>(&url, symbol))
            .retry(backoff)
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "Yahoo request failed, retrying"
                );
            })
            .await
    }

    async fn send_once<T: DeserializeOwned>(&self, url: &Url, symbol: &str) -> Result<T, MarketDataError> {
        debug!(symbol = %symbol, path = %url.path(), "Yahoo request");

        let mut request = self
            .client
            .get(url.clone())
            .header(REFERER, "https://finance.yahoo.com/");
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(MarketDataError::UnknownSymbol(symbol.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(MarketDataError::RateLimited),
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                Err(MarketDataError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
            _ => response
                .json::<T>()
                .await
                .map_err(|e| MarketDataError::Decode(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalMetrics, MarketDataError> {
        let url = self.endpoint(
            &["v10", "finance", "quoteSummary", symbol],
            &[("modules", SUMMARY_MODULES)],
        )?;
        let response: QuoteSummaryResponse = self.get_json(url, symbol).await?;

        if let Some(error) = response.quote_summary.error.filter(|e| !e.is_null()) {
            return Err(MarketDataError::Provider(format!("quoteSummary error: {}", error)));
        }

        response
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .map(FundamentalMetrics::from)
            .ok_or_else(|| MarketDataError::UnknownSymbol(symbol.to_string()))
    }

    async fn get_price_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<PriceHistory, MarketDataError> {
        let url = self.endpoint(
            &["v8", "finance", "chart", symbol],
            &[("range", range.as_str()), ("interval", "1d")],
        )?;
        let response: ChartResponse = self.get_json(url, symbol).await?;

        if let Some(error) = response.chart.error.filter(|e| !e.is_null()) {
            return Err(MarketDataError::Provider(format!("chart error: {}", error)));
        }

        // no result means no history for the ticker, which is not an error
        let history = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(PriceHistory::from)
            .unwrap_or_default();

        debug!(symbol = %symbol, closes = history.len(), range = %range, "Fetched price history");
        Ok(history)
    }
}
