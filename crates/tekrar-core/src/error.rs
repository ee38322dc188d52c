//! Pipeline error types.
//!
//! Dirty data inside the pipeline degrades silently: rows drop, unknown
//! modes default, out-of-range limits clamp. These types cover the places
//! that must stay loud instead. Defined in `tekrar-core` so callers can
//! distinguish "nothing to review" from "nothing arrived" without string
//! matching.

use thiserror::Error;

/// Errors decoding a whole results document.
#[derive(Debug, Error)]
pub enum LogError {
    /// The document had no content at all.
    #[error("results document is empty")]
    EmptyDocument,

    /// The document looked like JSON but did not parse.
    #[error("results document is not valid JSON: {0}")]
    InvalidJson(String),
}

impl LogError {
    /// Returns `true` when the failure indicates nothing arrived, as
    /// opposed to arriving in a shape we cannot read.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, LogError::EmptyDocument)
    }
}

/// Why a single results row failed to become an event.
///
/// One variant per logical column, so the drop-invalid-row policy is
/// observable in tests rather than an untyped skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// Timestamp missing or not in any accepted format.
    #[error("unreadable timestamp: {0:?}")]
    BadTimestamp(String),

    /// Item id column missing or blank.
    #[error("missing item id")]
    MissingItemId,

    /// Direction column missing or blank.
    #[error("missing direction")]
    MissingDirection,

    /// Correctness column not a recognized boolean token.
    #[error("unreadable correctness flag: {0:?}")]
    BadCorrect(String),
}
