//! Finboard Price Resolver Crate
//!
//! This crate provides multi-source current-price resolution for the
//! Finboard dashboard.
//!
//! # Overview
//!
//! A single entry point, [`PriceResolver::resolve_price`], obtains a current
//! price for an arbitrary ticker symbol from multiple heterogeneous,
//! unreliable upstreams - a structured quote API, an HTML-scraped quote
//! page, and a JSON chart API - and never fails visibly for a valid symbol:
//! when every upstream is down, a bounded synthetic price tagged `Degraded`
//! is served instead.
//!
//! # Architecture
//!
//! ```text
//! +-----------------+
//! |  PriceResolver  |  (facade: symbol precondition, then delegate)
//! +-----------------+
//!          |
//!          v
//! +------------------+
//! | FallbackResolver |  (ordered adapter chain, first success wins)
//! +------------------+
//!     |        |        |
//!     v        v        v
//! +-------+ +-------+ +-------+
//! | quote | | page  | | chart |  (PriceAdapter implementations)
//! +-------+ +-------+ +-------+
//!     \        |        /
//!      v       v       v
//!      +---------------+
//!      |   normalize   |  (locale-tolerant numeric parsing)
//!      +---------------+
//!          |
//!          v  (only when every adapter fails)
//! +------------------------+
//! | DegradedPriceGenerator |  (bounded synthetic price)
//! +------------------------+
//! ```
//!
//! The subsystem is stateless: everything lives and dies within one
//! `resolve_price` call, so concurrent calls need no coordination.
//!
//! # Core Types
//!
//! - [`PriceResolver`] - the resolution facade
//! - [`PriceResult`] - resolved price with its source tag
//! - [`PriceSource`] - which path produced the price
//! - [`Symbol`] - validated ticker with optional exchange qualifier
//! - [`ResolutionDiagnostics`] - per-call attempt journal

pub mod adapter;
pub mod degraded;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod resolver;

// Re-export all public types from models
pub use models::{PriceResult, PriceSource, Symbol};

// Re-export adapter types
pub use adapter::{
    AdapterOutcome, AdapterQuote, AlphaVantageAdapter, GoogleFinanceAdapter, PriceAdapter,
    YahooChartAdapter, DEFAULT_TIMEOUT,
};

// Re-export resolver types
pub use resolver::{
    AdapterAttempt, AttemptOutcome, FallbackResolver, PriceResolver, ResolutionDiagnostics,
};

// Re-export the degraded generator and errors
pub use degraded::DegradedPriceGenerator;
pub use errors::{AdapterError, AdapterErrorKind, NormalizeError, ResolveError};
