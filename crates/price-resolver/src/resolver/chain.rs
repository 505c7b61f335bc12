//! Fallback chain over the ordered adapter list.

use std::sync::Arc;

use log::{debug, warn};

use super::diagnostics::ResolutionDiagnostics;
use crate::adapter::PriceAdapter;
use crate::degraded::DegradedPriceGenerator;
use crate::models::{PriceResult, Symbol};

/// Tries adapters in list order and falls back to the degraded generator.
///
/// Effectively a finite state machine: `Trying(adapter_i)` for each list
/// position, with terminal states "resolved from adapter_i" and "degraded".
/// First success short-circuits; every failure kind means "try the next
/// adapter"; no adapter is retried within one resolution call (retries, if
/// wanted, belong to the caller, wrapping the whole resolver). Attempts run
/// strictly sequentially - deterministic source priority and minimal
/// upstream load are preferred over latency here.
///
/// Holds no mutable state, so concurrent `resolve` calls are fully
/// independent.
pub struct FallbackResolver {
    adapters: Vec<Arc<dyn PriceAdapter>>,
    degraded: DegradedPriceGenerator,
}

impl FallbackResolver {
    /// Create a resolver over an ordered adapter list.
    ///
    /// Position expresses priority: the first adapter is the most trusted.
    pub fn new(adapters: Vec<Arc<dyn PriceAdapter>>) -> Self {
        Self {
            adapters,
            degraded: DegradedPriceGenerator::new(),
        }
    }

    /// The adapters, in attempt order.
    pub fn adapters(&self) -> &[Arc<dyn PriceAdapter>] {
        &self.adapters
    }

    /// Resolve a price, discarding the diagnostics journal.
    pub async fn resolve(&self, symbol: &Symbol) -> PriceResult {
        let (result, _) = self.resolve_with_diagnostics(symbol).await;
        result
    }

    /// Resolve a price and report every attempt made along the way.
    ///
    /// Always returns a result: if every adapter fails, the degraded
    /// generator supplies a synthetic price.
    pub async fn resolve_with_diagnostics(
        &self,
        symbol: &Symbol,
    ) -> (PriceResult, ResolutionDiagnostics) {
        let mut diagnostics = ResolutionDiagnostics::new();

        for adapter in &self.adapters {
            match adapter.fetch(symbol).await {
                Ok(quote) => {
                    diagnostics.record_success(adapter.id());
                    debug!(
                        "resolved {} via '{}': {:.4}",
                        symbol,
                        adapter.id(),
                        quote.price
                    );
                    let result =
                        PriceResult::new(symbol, quote.price, adapter.source(), quote.raw);
                    return (result, diagnostics);
                }
                Err(e) => {
                    let kind = e.kind();
                    diagnostics.record_failure(adapter.id(), kind);
                    debug!(
                        "adapter '{}' failed for {} with {:?} ({}), trying next",
                        adapter.id(),
                        symbol,
                        kind,
                        e
                    );
                }
            }
        }

        diagnostics.mark_degraded();
        warn!(
            "all adapters failed for {}, serving degraded price [{}]",
            symbol,
            diagnostics.summary()
        );
        (self.degraded.generate(symbol), diagnostics)
    }
}
