//! Error types for codesight
//!
//! The compute core is total over its input domain and never fails; errors
//! only arise at the adapter and report boundaries.

use thiserror::Error;

/// Errors that can occur while parsing event logs or encoding reports
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to parse event log: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Events out of order: {0}")]
    OutOfOrder(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
