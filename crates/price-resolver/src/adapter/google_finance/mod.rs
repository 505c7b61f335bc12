//! Google Finance scraped-page adapter.
//!
//! Fetches the HTML quote page for a symbol (optionally qualified with an
//! exchange, e.g. `IBM:NYSE`) and extracts the price through an ordered
//! cascade of markup strategies. This is the only adapter that understands
//! the exchange qualifier.

mod extract;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::adapter::{AdapterOutcome, AdapterQuote, PriceAdapter, DEFAULT_TIMEOUT};
use crate::errors::AdapterError;
use crate::models::{PriceSource, Symbol};
use crate::normalize::normalize;

const BASE_URL: &str = "https://www.google.com";
const ADAPTER_ID: &str = "GOOGLE_FINANCE";

/// Scraped quote pages are served for browsers; a browser user agent keeps
/// the response shape consistent with what the extraction cascade expects.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Marker phrases of the search/disambiguation page, in the locales the
/// upstream serves them in. A page carrying one of these has no direct
/// quote for the requested symbol.
const DISAMBIGUATION_MARKERS: &[&str] = &[
    "Try with:",
    "Intenta con:",
    "Essayez avec :",
    "Versuche es mit:",
];

/// Scraped-page adapter backed by the Google Finance quote page.
pub struct GoogleFinanceAdapter {
    client: Client,
    base_url: String,
}

impl Default for GoogleFinanceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleFinanceAdapter {
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

    /// Classify and extract from a page body.
    ///
    /// The disambiguation check runs before extraction so the same body
    /// always classifies the same way: a search page is `NotFound` even if
    /// it happens to contain extractable price text for other instruments.
    fn parse_body(body: &str) -> AdapterOutcome {
        if DISAMBIGUATION_MARKERS
            .iter()
            .any(|marker| body.contains(marker))
        {
            return Err(AdapterError::NotFound);
        }

        let (stage, raw) =
            extract::extract_price_text(body).ok_or_else(|| AdapterError::ParseError {
                message: "no extraction stage yielded price text".to_string(),
            })?;

        debug!("Google Finance extraction via stage '{}': {:?}", stage, raw);

        let price = normalize(&raw)?;
        Ok(AdapterQuote {
            price,
            raw: Some(raw),
        })
    }

    /// Path segment for the quote page: `TICKER` or `TICKER:EXCHANGE`.
    fn path_symbol(symbol: &Symbol) -> String {
        match symbol.exchange() {
            Some(exchange) => format!("{}:{}", symbol.ticker(), exchange),
            None => symbol.ticker().to_string(),
        }
    }
}

#[async_trait]
impl PriceAdapter for GoogleFinanceAdapter {
    fn id(&self) -> &'static str {
        ADAPTER_ID
    }

    fn source(&self) -> PriceSource {
        PriceSource::ScrapedPage
    }

    async fn fetch(&self, symbol: &Symbol) -> AdapterOutcome {
        let url = format!(
            "{}/finance/quote/{}",
            self.base_url,
            Self::path_symbol(symbol)
        );

        debug!("Google Finance request: {}", url);

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
