//! Error types and failure classification for the price resolution crate.
//!
//! This module provides:
//! - [`AdapterError`]: the adapter-local failure taxonomy
//! - [`AdapterErrorKind`]: copyable classification used by the resolver and diagnostics
//! - [`NormalizeError`]: failures of the numeric text normalizer
//! - [`ResolveError`]: the only error the resolution facade surfaces to callers

use thiserror::Error;

/// Failures of the numeric text normalizer.
///
/// Produced by [`normalize`](crate::normalize::normalize) when locale-formatted
/// price text cannot be converted into a finite positive number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Nothing numeric remained after cleaning.
    #[error("empty numeric text")]
    Empty,

    /// More than one decimal point survived cleaning.
    #[error("ambiguous decimal separators in {0:?}")]
    AmbiguousSeparators(String),

    /// The cleaned text is not parseable as a number.
    #[error("unparseable numeric text {0:?}")]
    Unparseable(String),

    /// The text parsed, but not to a finite positive number.
    #[error("not a finite positive number: {0:?}")]
    NotPositive(String),
}

/// Errors an adapter can produce while fetching a price.
///
/// Every failure path inside an adapter is converted into one of these
/// variants; adapters never panic on upstream data and never let transport
/// errors escape unclassified. The resolver consumes the classification
/// purely to decide "try the next adapter" - no variant is fatal at that
/// layer.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The upstream answered with a non-success HTTP status.
    #[error("HTTP {status}")]
    HttpStatus {
        /// The status code received
        status: u16,
    },

    /// The request did not complete within the adapter timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure before any status was received.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The upstream signaled quota exhaustion, either via HTTP 429 or a
    /// body-level marker field.
    #[error("rate limited by provider")]
    RateLimited,

    /// The upstream responded but has no direct match for the symbol
    /// (disambiguation page, empty quote object, explicit error body).
    #[error("no direct match for symbol")]
    NotFound,

    /// A response was received but the expected data shape or pattern
    /// is absent.
    #[error("unexpected response shape: {message}")]
    ParseError {
        /// Description of what was missing or malformed
        message: String,
    },

    /// Extracted text could not be normalized into a usable price.
    #[error("price normalization failed: {0}")]
    Normalization(#[from] NormalizeError),
}

/// Copyable classification of an [`AdapterError`].
///
/// Used for logging, for the per-call diagnostics journal, and for asserting
/// that classification is deterministic (the same malformed input always
/// yields the same kind).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdapterErrorKind {
    /// Non-success HTTP status
    HttpStatus,
    /// Request exceeded the adapter timeout
    Timeout,
    /// Connection-level failure
    Transport,
    /// Quota exhaustion signal
    RateLimited,
    /// No direct match for the symbol
    NotFound,
    /// Expected shape or pattern absent
    Parse,
    /// Extracted text not a finite positive number
    Normalization,
}

impl AdapterError {
    /// Returns the copyable classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use finboard_price_resolver::errors::{AdapterError, AdapterErrorKind};
    ///
    /// let error = AdapterError::RateLimited;
    /// assert_eq!(error.kind(), AdapterErrorKind::RateLimited);
    ///
    /// let error = AdapterError::HttpStatus { status: 503 };
    /// assert_eq!(error.kind(), AdapterErrorKind::HttpStatus);
    /// ```
    pub fn kind(&self) -> AdapterErrorKind {
        match self {
            Self::HttpStatus { .. } => AdapterErrorKind::HttpStatus,
            Self::Timeout => AdapterErrorKind::Timeout,
            Self::Transport { .. } => AdapterErrorKind::Transport,
            Self::RateLimited => AdapterErrorKind::RateLimited,
            Self::NotFound => AdapterErrorKind::NotFound,
            Self::ParseError { .. } => AdapterErrorKind::Parse,
            Self::Normalization(_) => AdapterErrorKind::Normalization,
        }
    }

    /// Classify a `reqwest` transport error.
    ///
    /// Timeouts get their own kind so a hung upstream is distinguishable
    /// from a refused connection in logs and diagnostics.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

/// The only error the resolution facade surfaces to callers.
///
/// Adapter-level failures are fully absorbed by the resolver/degraded-mode
/// chain; a malformed symbol is the sole precondition violation, checked
/// before any network call is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The input is empty or not ticker-shaped.
    #[error("invalid symbol: {symbol:?}")]
    InvalidSymbol {
        /// The rejected input, as received
        symbol: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_kind() {
        let error = AdapterError::HttpStatus { status: 500 };
        assert_eq!(error.kind(), AdapterErrorKind::HttpStatus);
    }

    #[test]
    fn test_timeout_kind() {
        let error = AdapterError::Timeout;
        assert_eq!(error.kind(), AdapterErrorKind::Timeout);
    }

    #[test]
    fn test_rate_limited_kind() {
        let error = AdapterError::RateLimited;
        assert_eq!(error.kind(), AdapterErrorKind::RateLimited);
    }

    #[test]
    fn test_not_found_kind() {
        let error = AdapterError::NotFound;
        assert_eq!(error.kind(), AdapterErrorKind::NotFound);
    }

    #[test]
    fn test_parse_error_kind() {
        let error = AdapterError::ParseError {
            message: "missing price field".to_string(),
        };
        assert_eq!(error.kind(), AdapterErrorKind::Parse);
    }

    #[test]
    fn test_normalization_kind() {
        let error = AdapterError::Normalization(NormalizeError::Empty);
        assert_eq!(error.kind(), AdapterErrorKind::Normalization);
    }

    #[test]
    fn test_normalize_error_converts() {
        fn classify(err: NormalizeError) -> AdapterError {
            err.into()
        }
        let error = classify(NormalizeError::NotPositive("-3".to_string()));
        assert_eq!(error.kind(), AdapterErrorKind::Normalization);
    }

    #[test]
    fn test_error_display() {
        let error = AdapterError::HttpStatus { status: 429 };
        assert_eq!(format!("{}", error), "HTTP 429");

        let error = AdapterError::ParseError {
            message: "no price container".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "unexpected response shape: no price container"
        );

        let error = ResolveError::InvalidSymbol {
            symbol: "".to_string(),
        };
        assert_eq!(format!("{}", error), "invalid symbol: \"\"");
    }
}
