use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::symbol::Symbol;

/// Which path produced a resolved price.
///
/// Callers that care about data fidelity must inspect this tag: `Degraded`
/// marks a synthetic price produced after every real provider failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Structured JSON quote endpoint
    StructuredQuote,
    /// HTML-scraped quote page
    ScrapedPage,
    /// JSON time-series/chart endpoint
    ChartApi,
    /// Synthetic price from the degraded-mode generator
    Degraded,
}

impl PriceSource {
    /// Stable string form, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredQuote => "STRUCTURED_QUOTE",
            Self::ScrapedPage => "SCRAPED_PAGE",
            Self::ChartApi => "CHART_API",
            Self::Degraded => "DEGRADED",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved price for one symbol.
///
/// Invariants: `price` is always finite and positive, `source` is always
/// populated. A `PriceResult` is never partially constructed - the facade
/// returns either a full result or a classified failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// The canonical symbol the price was resolved for
    pub symbol: String,

    /// Current price, in the provider's quote currency
    pub price: f64,

    /// Which path produced the price
    pub source: PriceSource,

    /// When the resolution completed
    pub fetched_at: DateTime<Utc>,

    /// Raw extracted text the price was parsed from, when a provider
    /// supplied one (absent for degraded results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl PriceResult {
    /// Build a result stamped with the current time.
    pub(crate) fn new(
        symbol: &Symbol,
        price: f64,
        source: PriceSource,
        raw: Option<String>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            source,
            fetched_at: Utc::now(),
            raw,
        }
    }

    /// Whether this price came from a real upstream provider.
    pub fn is_real(&self) -> bool {
        self.source != PriceSource::Degraded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_construction() {
        let symbol = Symbol::parse("AAPL").unwrap();
        let result = PriceResult::new(
            &symbol,
            180.25,
            PriceSource::StructuredQuote,
            Some("180.2500".to_string()),
        );
        assert_eq!(result.symbol, "AAPL");
        assert_eq!(result.price, 180.25);
        assert_eq!(result.source, PriceSource::StructuredQuote);
        assert!(result.is_real());
    }

    #[test]
    fn test_degraded_is_not_real() {
        let symbol = Symbol::parse("IBM").unwrap();
        let result = PriceResult::new(&symbol, 249.20, PriceSource::Degraded, None);
        assert!(!result.is_real());
    }

    #[test]
    fn test_source_display() {
        assert_eq!(PriceSource::StructuredQuote.to_string(), "STRUCTURED_QUOTE");
        assert_eq!(PriceSource::Degraded.to_string(), "DEGRADED");
    }

    #[test]
    fn test_serialization_shape() {
        let symbol = Symbol::parse("IBM:NYSE").unwrap();
        let result = PriceResult::new(&symbol, 249.20, PriceSource::ScrapedPage, None);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["symbol"], "IBM:NYSE");
        assert_eq!(json["source"], "ScrapedPage");
        assert!(json.get("fetchedAt").is_some());
        assert!(json.get("raw").is_none());
    }
}
