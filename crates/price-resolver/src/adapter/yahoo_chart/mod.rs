//! Yahoo Finance chart-API adapter.
//!
//! Fetches the v8 chart endpoint and reads the regular market price out of
//! the result metadata. The schema nests deeply and shifts without notice,
//! which is why this adapter sits last in the default chain.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::adapter::{AdapterOutcome, AdapterQuote, PriceAdapter, DEFAULT_TIMEOUT};
use crate::errors::AdapterError;
use crate::models::{PriceSource, Symbol};

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const ADAPTER_ID: &str = "YAHOO_CHART";

/// The chart endpoint rejects requests without a browser user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Chart-API adapter backed by the Yahoo Finance v8 chart endpoint.
pub struct YahooChartAdapter {
    client: Client,
    base_url: String,
}

// ============================================================================
// Response structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    // Note: the endpoint also returns timestamp arrays and indicator
    // series that this adapter does not need
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
}

// ============================================================================
// YahooChartAdapter implementation
// ============================================================================

impl Default for YahooChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooChartAdapter {
    /// Create a new adapter with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new adapter with an explicit network timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the adapter at a different host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Walk the nested response shape down to the regular market price.
    fn parse_body(body: &str) -> AdapterOutcome {
        let response: ChartResponse =
            serde_json::from_str(body).map_err(|e| AdapterError::ParseError {
                message: format!("invalid JSON body: {}", e),
            })?;

        if let Some(error) = response.chart.error {
            debug!(
                "Yahoo chart error body: {} - {}",
                error.code.as_deref().unwrap_or("?"),
                error.description.as_deref().unwrap_or("?")
            );
            return Err(AdapterError::NotFound);
        }

        let price = response
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    results.remove(0).meta
                }
            })
            .and_then(|meta| meta.regular_market_price)
            .ok_or_else(|| AdapterError::ParseError {
                message: "chart.result[0].meta.regularMarketPrice absent".to_string(),
            })?;

        if !price.is_finite() || price <= 0.0 {
            return Err(AdapterError::ParseError {
                message: format!("non-positive regularMarketPrice: {}", price),
            });
        }

        Ok(AdapterQuote { price, raw: None })
    }
}

#[async_trait]
impl PriceAdapter for YahooChartAdapter {
    fn id(&self) -> &'static str {
        ADAPTER_ID
    }

    fn source(&self) -> PriceSource {
        PriceSource::ChartApi
    }

    async fn fetch(&self, symbol: &Symbol) -> AdapterOutcome {
        // The chart endpoint does not understand exchange qualifiers;
        // only the bare ticker is sent.
        let url = format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            symbol.ticker()
        );

        debug!("Yahoo chart request: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(AdapterError::from_transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AdapterError::RateLimited);
        }
        if !status.is_success() {
            return Err(AdapterError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(AdapterError::from_transport)?;

        Self::parse_body(&body)
    }
}
