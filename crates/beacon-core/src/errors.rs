//! Error types shared across Beacon crates.
//!
//! Domain-specific errors (`DatabaseError`, `ConfigError`, `InsightError`)
//! are defined in their respective crates. `GatewayError` is the currency of
//! the store seam: every `CitationGateway` implementation reports failures
//! with it.

use thiserror::Error;

/// Failure reported by a citation store gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The store could not be reached or the request failed inside it.
    #[error("Store request failed: {0}")]
    Store(String),

    /// The store returned a record that could not be decoded.
    #[error("Invalid record from store: {0}")]
    InvalidRecord(String),

    /// The request itself was rejected before reaching the store.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
