//! Degraded-mode price generation.
//!
//! When every adapter fails, the resolver still owes its caller a usable
//! number: a plausible synthetic price, tagged `Degraded` so callers that
//! care about fidelity can tell it apart from a real quote. Availability is
//! deliberately traded against correctness here - this feature is
//! informational, and a blank dashboard tile is worse than a stale-looking
//! one.

use log::debug;
use rand::Rng;

use crate::models::{PriceResult, PriceSource, Symbol};

/// Lower bound on any generated price.
pub const MIN_PRICE: f64 = 0.01;

/// Relative perturbation applied to baseline prices.
const PERTURBATION: f64 = 0.02;

/// Range for symbols without a baseline entry.
const UNKNOWN_LOW: f64 = 10.0;
const UNKNOWN_HIGH: f64 = 500.0;

/// Baseline prices for well-known symbols, a snapshot at authoring time.
/// These drift from reality and are a placeholder strategy, not a data
/// source anyone should keep accurate.
const BASELINE_PRICES: &[(&str, f64)] = &[
    ("AAPL", 231.60),
    ("MSFT", 517.90),
    ("GOOGL", 201.40),
    ("AMZN", 222.50),
    ("META", 760.50),
    ("TSLA", 319.00),
    ("NVDA", 177.90),
    ("IBM", 249.20),
    ("JPM", 295.30),
    ("V", 348.70),
    ("WMT", 98.40),
    ("XOM", 109.80),
    ("KO", 69.50),
    ("DIS", 118.20),
    ("NFLX", 1178.00),
];

/// Generator for bounded, symbol-aware synthetic prices. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct DegradedPriceGenerator;

impl DegradedPriceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Produce a synthetic `PriceResult` for the symbol.
    ///
    /// Symbols with a baseline entry get the baseline perturbed by up to
    /// ±2%, so repeated calls do not return an obviously static number.
    /// Unknown symbols get a uniform price in a broad fixed range. Either
    /// way the result is floored at [`MIN_PRICE`].
    pub fn generate(&self, symbol: &Symbol) -> PriceResult {
        let mut rng = rand::thread_rng();

        let price = match baseline(symbol.ticker()) {
            Some(base) => {
                let factor = 1.0 + rng.gen_range(-PERTURBATION..=PERTURBATION);
                base * factor
            }
            None => rng.gen_range(UNKNOWN_LOW..=UNKNOWN_HIGH),
        }
        .max(MIN_PRICE);

        debug!(
            "degraded price for {}: {:.2} (baseline {:?})",
            symbol,
            price,
            baseline(symbol.ticker())
        );

        PriceResult::new(symbol, price, PriceSource::Degraded, None)
    }
}

/// Baseline lookup by bare ticker; the exchange qualifier does not matter.
fn baseline(ticker: &str) -> Option<f64> {
    BASELINE_PRICES
        .iter()
        .find(|(known, _)| *known == ticker)
        .map(|(_, price)| *price)
}
