//! The single exposed entry point for price resolution.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::chain::FallbackResolver;
use super::diagnostics::ResolutionDiagnostics;
use crate::adapter::{
    AlphaVantageAdapter, GoogleFinanceAdapter, PriceAdapter, YahooChartAdapter, DEFAULT_TIMEOUT,
};
use crate::errors::ResolveError;
use crate::models::{PriceResult, Symbol};

/// Resolution facade used by the market-data and portfolio-valuation
/// callers.
///
/// Wraps the fallback chain behind one call: validate the symbol, walk the
/// adapters, degrade if necessary. The only error callers ever see is
/// [`ResolveError::InvalidSymbol`]; every adapter-level failure is absorbed
/// below this line.
pub struct PriceResolver {
    chain: FallbackResolver,
}

impl PriceResolver {
    /// Create a resolver with the default adapter chain.
    ///
    /// Priority order: structured quote first (most reliable when
    /// available), scraped page second, chart API last (most fragile
    /// schema). `api_key` is the structured-quote provider's key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a resolver with the default chain and an explicit per-adapter
    /// network timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let adapters: Vec<Arc<dyn PriceAdapter>> = vec![
            Arc::new(AlphaVantageAdapter::with_timeout(api_key, timeout)),
            Arc::new(GoogleFinanceAdapter::with_timeout(timeout)),
            Arc::new(YahooChartAdapter::with_timeout(timeout)),
        ];
        Self::with_adapters(adapters)
    }

    /// Create a resolver over an explicit ordered adapter list.
    ///
    /// Position expresses priority. Useful for custom chains and for tests.
    pub fn with_adapters(adapters: Vec<Arc<dyn PriceAdapter>>) -> Self {
        Self {
            chain: FallbackResolver::new(adapters),
        }
    }

    /// Resolve the current price for a ticker symbol.
    ///
    /// # Errors
    ///
    /// Only [`ResolveError::InvalidSymbol`], for empty or malformed input,
    /// checked before any adapter is invoked. A valid symbol always gets a
    /// result - possibly a `Degraded` one; inspect
    /// [`PriceResult::source`](crate::models::PriceResult) if fidelity
    /// matters.
    pub async fn resolve_price(&self, symbol: &str) -> Result<PriceResult, ResolveError> {
        let symbol = Symbol::parse(symbol)?;
        debug!("resolving price for {}", symbol);
        Ok(self.chain.resolve(&symbol).await)
    }

    /// Resolve a price and report every adapter attempt made along the way.
    pub async fn resolve_price_with_diagnostics(
        &self,
        symbol: &str,
    ) -> Result<(PriceResult, ResolutionDiagnostics), ResolveError> {
        let symbol = Symbol::parse(symbol)?;
        Ok(self.chain.resolve_with_diagnostics(&symbol).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{AdapterOutcome, AdapterQuote};
    use crate::errors::AdapterError;
    use crate::models::PriceSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAdapter {
        call_count: AtomicUsize,
    }

    impl CountingAdapter {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                call_count: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PriceAdapter for CountingAdapter {
        fn id(&self) -> &'static str {
            "COUNTING"
        }

        fn source(&self) -> PriceSource {
            PriceSource::StructuredQuote
        }

        async fn fetch(&self, _symbol: &Symbol) -> AdapterOutcome {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(AdapterQuote {
                price: 180.25,
                raw: None,
            })
        }
    }

    struct FailingAdapter;

    #[async_trait]
    impl PriceAdapter for FailingAdapter {
        fn id(&self) -> &'static str {
            "FAILING"
        }

        fn source(&self) -> PriceSource {
            PriceSource::ChartApi
        }

        async fn fetch(&self, _symbol: &Symbol) -> AdapterOutcome {
            Err(AdapterError::HttpStatus { status: 503 })
        }
    }

    #[tokio::test]
    async fn test_empty_symbol_rejected_before_any_fetch() {
        let adapter = CountingAdapter::new();
        let resolver = PriceResolver::with_adapters(vec![adapter.clone()]);

        let err = resolver.resolve_price("").await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidSymbol { .. }));
        assert_eq!(adapter.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_symbol_rejected_before_any_fetch() {
        let adapter = CountingAdapter::new();
        let resolver = PriceResolver::with_adapters(vec![adapter.clone()]);

        let err = resolver.resolve_price("not a ticker!").await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidSymbol { .. }));
        assert_eq!(adapter.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_symbol_resolves() {
        let adapter = CountingAdapter::new();
        let resolver = PriceResolver::with_adapters(vec![adapter.clone()]);

        let result = resolver.resolve_price("AAPL").await.unwrap();

        assert_eq!(result.symbol, "AAPL");
        assert_eq!(result.price, 180.25);
        assert_eq!(result.source, PriceSource::StructuredQuote);
        assert_eq!(adapter.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lowercase_input_is_canonicalized() {
        let resolver = PriceResolver::with_adapters(vec![CountingAdapter::new()]);
        let result = resolver.resolve_price("aapl").await.unwrap();
        assert_eq!(result.symbol, "AAPL");
    }

    #[tokio::test]
    async fn test_adapter_failures_never_propagate() {
        let resolver = PriceResolver::with_adapters(vec![Arc::new(FailingAdapter)]);

        let result = resolver.resolve_price("IBM").await.unwrap();

        assert_eq!(result.source, PriceSource::Degraded);
        assert!(result.price > 0.0);
    }

    #[tokio::test]
    async fn test_diagnostics_surface_attempts() {
        let resolver = PriceResolver::with_adapters(vec![Arc::new(FailingAdapter)]);

        let (result, diagnostics) = resolver
            .resolve_price_with_diagnostics("IBM")
            .await
            .unwrap();

        assert_eq!(result.source, PriceSource::Degraded);
        assert_eq!(diagnostics.attempts().len(), 1);
        assert!(diagnostics.fell_back_to_degraded());
    }

    #[test]
    fn test_default_chain_order() {
        let resolver = PriceResolver::new("test_key");
        let ids: Vec<_> = resolver
            .chain
            .adapters()
            .iter()
            .map(|a| a.id())
            .collect();
        assert_eq!(ids, vec!["ALPHA_VANTAGE", "GOOGLE_FINANCE", "YAHOO_CHART"]);
    }
}
