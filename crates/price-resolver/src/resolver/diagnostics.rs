//! Per-call diagnostics for resolution attempts.
//!
//! The resolver absorbs every adapter failure by design, which makes "why
//! did this symbol come back degraded?" invisible without a record. The
//! diagnostics journal captures each attempt and its classified outcome;
//! it is returned alongside the result and never influences control flow.

use std::fmt;

use crate::errors::AdapterErrorKind;

/// Outcome of one adapter attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttemptOutcome {
    /// The adapter produced a usable price
    Succeeded,
    /// The adapter failed with the recorded classification
    Failed(AdapterErrorKind),
}

/// One adapter attempt within a resolution call.
#[derive(Clone, Debug)]
pub struct AdapterAttempt {
    /// The adapter's identifier
    pub adapter: &'static str,
    /// What the attempt produced
    pub outcome: AttemptOutcome,
}

/// Journal of every adapter attempt within one resolution call.
#[derive(Clone, Debug, Default)]
pub struct ResolutionDiagnostics {
    attempts: Vec<AdapterAttempt>,
    degraded: bool,
}

impl ResolutionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attempts, in the order they were made.
    pub fn attempts(&self) -> &[AdapterAttempt] {
        &self.attempts
    }

    /// Whether the call fell through to the degraded generator.
    pub fn fell_back_to_degraded(&self) -> bool {
        self.degraded
    }

    pub(crate) fn record_success(&mut self, adapter: &'static str) {
        self.attempts.push(AdapterAttempt {
            adapter,
            outcome: AttemptOutcome::Succeeded,
        });
    }

    pub(crate) fn record_failure(&mut self, adapter: &'static str, kind: AdapterErrorKind) {
        self.attempts.push(AdapterAttempt {
            adapter,
            outcome: AttemptOutcome::Failed(kind),
        });
    }

    pub(crate) fn mark_degraded(&mut self) {
        self.degraded = true;
    }

    /// Compact one-line rendering for logs.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .attempts
            .iter()
            .map(|attempt| match attempt.outcome {
                AttemptOutcome::Succeeded => format!("{}=ok", attempt.adapter),
                AttemptOutcome::Failed(kind) => format!("{}={:?}", attempt.adapter, kind),
            })
            .collect();
        if self.degraded {
            parts.push("degraded".to_string());
        }
        parts.join(", ")
    }
}

impl fmt::Display for ResolutionDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rendering() {
        let mut diagnostics = ResolutionDiagnostics::new();
        diagnostics.record_failure("ALPHA_VANTAGE", AdapterErrorKind::RateLimited);
        diagnostics.record_success("GOOGLE_FINANCE");

        assert_eq!(
            diagnostics.summary(),
            "ALPHA_VANTAGE=RateLimited, GOOGLE_FINANCE=ok"
        );
        assert!(!diagnostics.fell_back_to_degraded());
    }

    #[test]
    fn test_degraded_marker() {
        let mut diagnostics = ResolutionDiagnostics::new();
        diagnostics.record_failure("ALPHA_VANTAGE", AdapterErrorKind::Timeout);
        diagnostics.mark_degraded();

        assert!(diagnostics.fell_back_to_degraded());
        assert_eq!(diagnostics.summary(), "ALPHA_VANTAGE=Timeout, degraded");
    }

    #[test]
    fn test_attempt_order_preserved() {
        let mut diagnostics = ResolutionDiagnostics::new();
        diagnostics.record_failure("A", AdapterErrorKind::HttpStatus);
        diagnostics.record_failure("B", AdapterErrorKind::Parse);
        diagnostics.record_failure("C", AdapterErrorKind::NotFound);

        let adapters: Vec<_> = diagnostics
            .attempts()
            .iter()
            .map(|a| a.adapter)
            .collect();
        assert_eq!(adapters, vec!["A", "B", "C"]);
    }
}
