use std::fmt;

use crate::errors::ResolveError;

/// Maximum length accepted for the ticker part and the exchange qualifier.
const MAX_PART_LEN: usize = 12;

/// A validated ticker symbol, optionally qualified with an exchange.
///
/// Input is uppercased on construction; `"ibm:nyse"` and `"IBM:NYSE"` are
/// the same symbol. The exchange qualifier is understood only by the
/// scraped-page adapter - the other adapters send the bare ticker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    ticker: String,
    exchange: Option<String>,
}

impl Symbol {
    /// Validate and parse raw input into a `Symbol`.
    ///
    /// Accepts a non-empty ticker of letters, digits, `.` and `-`, with an
    /// optional `:EXCHANGE` suffix. This is the facade's precondition check:
    /// it runs before any adapter is invoked.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidSymbol`] for empty or non-ticker-shaped
    /// input.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let invalid = || ResolveError::InvalidSymbol {
            symbol: input.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let upper = trimmed.to_ascii_uppercase();
        let mut parts = upper.splitn(2, ':');
        let ticker = parts.next().unwrap_or_default();
        let exchange = parts.next();

        if !is_ticker_shaped(ticker) {
            return Err(invalid());
        }
        if let Some(exchange) = exchange {
            if !is_exchange_shaped(exchange) {
                return Err(invalid());
            }
        }

        Ok(Self {
            ticker: ticker.to_string(),
            exchange: exchange.map(str::to_string),
        })
    }

    /// The bare ticker, without any exchange qualifier.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The exchange qualifier, if one was given.
    pub fn exchange(&self) -> Option<&str> {
        self.exchange.as_deref()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exchange {
            Some(exchange) => write!(f, "{}:{}", self.ticker, exchange),
            None => write!(f, "{}", self.ticker),
        }
    }
}

fn is_ticker_shaped(part: &str) -> bool {
    !part.is_empty()
        && part.len() <= MAX_PART_LEN
        && part.starts_with(|c: char| c.is_ascii_alphanumeric())
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

fn is_exchange_shaped(part: &str) -> bool {
    !part.is_empty()
        && part.len() <= MAX_PART_LEN
        && part.chars().all(|c| c.is_ascii_alphanumeric())
}
