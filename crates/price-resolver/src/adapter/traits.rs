//! Price adapter trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AdapterError;
use crate::models::{PriceSource, Symbol};

/// Default per-adapter network timeout.
///
/// A hung upstream must not stall the whole fallback chain; on timeout the
/// attempt classifies as [`AdapterError::Timeout`] and the resolver moves on.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Successful extraction from one upstream.
#[derive(Clone, Debug)]
pub struct AdapterQuote {
    /// The normalized price
    pub price: f64,

    /// The raw text the price was extracted from, for the caller's `raw`
    /// field (providers that return plain numbers leave their own rendering)
    pub raw: Option<String>,
}

/// What one adapter attempt produced: a price, or a classified failure.
///
/// Transient by design - an outcome lives only for the duration of one
/// resolution call and is never persisted.
pub type AdapterOutcome = Result<AdapterQuote, AdapterError>;

/// Trait for upstream price adapters.
///
/// Implement this trait to add support for a new price source. The resolver
/// tries adapters in list order, so priority is expressed by position, not
/// by the adapter itself.
///
/// # Contract
///
/// - one network round trip per `fetch` call, bounded by the adapter timeout;
/// - no internal retries (retrying is the caller's responsibility);
/// - every failure path returns a classified error - `fetch` must not panic
///   on upstream data.
#[async_trait]
pub trait PriceAdapter: Send + Sync {
    /// Unique identifier for this adapter, used in logs and diagnostics.
    fn id(&self) -> &'static str;

    /// The source tag stamped on results this adapter produces.
    fn source(&self) -> PriceSource;

    /// Fetch the current price for a symbol.
    async fn fetch(&self, symbol: &Symbol) -> AdapterOutcome;
}
