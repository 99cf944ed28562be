//! Structured error types for the seqmotif ecosystem.

use thiserror::Error;

/// Unified error type for all seqmotif operations.
///
/// Domain outcomes that are not errors — a pattern that cannot embed into a
/// particular sequence, or a query with no common motif — are reported as
/// `Option`/empty payloads by the functions concerned, never through this
/// type. `SeqmotifError` is reserved for invalid parameters and malformed
/// notation input.
#[derive(Debug, Error)]
pub enum SeqmotifError {
    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parse error (malformed pattern notation)
    #[error("parse error: {0}")]
    Parse(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the seqmotif ecosystem.
pub type Result<T> = std::result::Result<T, SeqmotifError>;
