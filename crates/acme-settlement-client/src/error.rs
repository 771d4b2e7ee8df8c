//! Client error types.

use acme_settlement_core::FailureRecord;

/// Every retry attempt for one logical call failed.
///
/// Carries the full ordered attempt history as data so callers can embed it
/// in diagnostics without re-parsing a message string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("request to {url} failed after {attempts} attempts", attempts = .failures.len())]
pub struct RequestExhausted {
    /// The URL the call was issued against.
    pub url: String,

    /// One record per failed attempt, in order.
    pub failures: Vec<FailureRecord>,
}
