//! Alpha Vantage structured-quote adapter.
//!
//! Fetches the current price via the GLOBAL_QUOTE endpoint, which returns a
//! small JSON object with numeric-as-string fields.
//!
//! Note: the free tier is limited to a handful of calls per minute; quota
//! exhaustion is signaled through body-level `Note`/`Information` fields on
//! an HTTP 200, not through a status code.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::adapter::{AdapterOutcome, AdapterQuote, PriceAdapter, DEFAULT_TIMEOUT};
use crate::errors::AdapterError;
use crate::models::{PriceSource, Symbol};
use crate::normalize::normalize;

const BASE_URL: &str = "https://www.alphavantage.co";
const ADAPTER_ID: &str = "ALPHA_VANTAGE";

/// Structured-quote adapter backed by the Alpha Vantage GLOBAL_QUOTE API.
pub struct AlphaVantageAdapter {
    client: Client,
    base_url: String,
    api_key: String,
}

// ============================================================================
// Response structures
// ============================================================================

/// GLOBAL_QUOTE response envelope.
///
/// On quota exhaustion the API answers HTTP 200 with only an `Information`
/// or `Note` field; on an unknown symbol it answers with an empty
/// `Global Quote` object.
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
    // Note: the API also returns open/high/low/volume/change fields
    // that this adapter does not need
}

impl GlobalQuoteResponse {
    /// Classify body-level markers.
    ///
    /// `Note`/`Information` are quota markers and must classify as
    /// `RateLimited`, not as a parse failure. An explicit `Error Message`
    /// means the symbol was not recognized.
    fn check_markers(&self) -> Result<(), AdapterError> {
        if let Some(ref msg) = self.information {
            warn!("Alpha Vantage information marker: {}", msg);
            return Err(AdapterError::RateLimited);
        }
        if let Some(ref msg) = self.note {
            warn!("Alpha Vantage note marker: {}", msg);
            return Err(AdapterError::RateLimited);
        }
        if let Some(ref msg) = self.error_message {
            debug!("Alpha Vantage error message: {}", msg);
            return Err(AdapterError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// AlphaVantageAdapter implementation
// ============================================================================

impl AlphaVantageAdapter {
    /// Create a new adapter with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new adapter with an explicit network timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the adapter at a different host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Extract the price from a response body already known to be JSON.
    ///
    /// Pure with respect to I/O, so the wire-format edge cases are testable
    /// against fixture bodies.
    fn parse_body(body: &str) -> AdapterOutcome {
        let response: GlobalQuoteResponse =
            serde_json::from_str(body).map_err(|e| AdapterError::ParseError {
                message: format!("invalid JSON body: {}", e),
            })?;

        response.check_markers()?;

        let quote = response.global_quote.ok_or(AdapterError::NotFound)?;
        let raw = quote.price.ok_or(AdapterError::NotFound)?;

        let price = normalize(&raw)?;
        Ok(AdapterQuote {
            price,
            raw: Some(raw),
        })
    }
}

#[async_trait]
impl PriceAdapter for AlphaVantageAdapter {
    fn id(&self) -> &'static str {
        ADAPTER_ID
    }

    fn source(&self) -> PriceSource {
        PriceSource::StructuredQuote
    }

    async fn fetch(&self, symbol: &Symbol) -> AdapterOutcome {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/query", self.base_url),
            &[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol.ticker()),
                ("apikey", &self.api_key),
            ],
        )
        .map_err(|e| AdapterError::ParseError {
            message: format!("failed to build URL: {}", e),
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self
            .client
            .get(url)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_quote() {
        let body = r#"{"Global Quote":{"01. symbol":"AAPL","05. price":"180.2500","07. latest trading day":"2026-08-06"}}"#;
        let quote = AlphaVantageAdapter::parse_body(body).unwrap();
        assert_eq!(quote.price, 180.25);
        assert_eq!(quote.raw.as_deref(), Some("180.2500"));
    }

    #[test]
    fn test_information_marker_is_rate_limited() {
        let body = r#"{"Information":"Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;
        let err = AlphaVantageAdapter::parse_body(body).unwrap_err();
        assert!(matches!(err, AdapterError::RateLimited));
    }

    #[test]
    fn test_note_marker_is_rate_limited() {
        let body = r#"{"Note":"Please consider optimizing your API call frequency."}"#;
        let err = AlphaVantageAdapter::parse_body(body).unwrap_err();
        assert!(matches!(err, AdapterError::RateLimited));
    }

    #[test]
    fn test_error_message_is_not_found() {
        let body = r#"{"Error Message":"Invalid API call. Please retry or visit the documentation."}"#;
        let err = AlphaVantageAdapter::parse_body(body).unwrap_err();
        assert!(matches!(err, AdapterError::NotFound));
    }

    #[test]
    fn test_empty_quote_object_is_not_found() {
        let body = r#"{"Global Quote":{}}"#;
        let err = AlphaVantageAdapter::parse_body(body).unwrap_err();
        assert!(matches!(err, AdapterError::NotFound));
    }

    #[test]
    fn test_missing_quote_is_not_found() {
        let body = r#"{}"#;
        let err = AlphaVantageAdapter::parse_body(body).unwrap_err();
        assert!(matches!(err, AdapterError::NotFound));
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        let err = AlphaVantageAdapter::parse_body("<html>surprise</html>").unwrap_err();
        assert!(matches!(err, AdapterError::ParseError { .. }));
    }

    #[test]
    fn test_unparseable_price_is_normalization_error() {
        let body = r#"{"Global Quote":{"05. price":"n/a"}}"#;
        let err = AlphaVantageAdapter::parse_body(body).unwrap_err();
        assert!(matches!(err, AdapterError::Normalization(_)));
    }

    #[test]
    fn test_adapter_identity() {
        let adapter = AlphaVantageAdapter::new("test_key");
        assert_eq!(adapter.id(), "ALPHA_VANTAGE");
        assert_eq!(adapter.source(), PriceSource::StructuredQuote);
    }
}
