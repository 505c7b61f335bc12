//! Resolution orchestration.
//!
//! This module provides:
//! - [`FallbackResolver`]: walks the ordered adapter chain, falls back to
//!   the degraded generator when every adapter fails
//! - [`PriceResolver`]: the single exposed entry point, adding the symbol
//!   precondition check in front of the chain
//! - [`ResolutionDiagnostics`]: per-call attempt journal for debugging
//!   which adapters were tried and how they failed

mod chain;
mod diagnostics;
mod facade;

pub use chain::FallbackResolver;
pub use diagnostics::{AdapterAttempt, AttemptOutcome, ResolutionDiagnostics};
pub use facade::PriceResolver;
