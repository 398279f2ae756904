//! Unified error types for chatwrap.
//!
//! This module provides a single [`ChatwrapError`] enum covering every error
//! the library can surface. Per-line anomalies inside an export are never
//! errors: malformed lines degrade to continuations of the previous message,
//! so only document-level failures reach the caller.

use thiserror::Error;

/// A specialized [`Result`] type for chatwrap operations.
///
/// # Example
///
/// ```rust
/// use chatwrap::error::Result;
/// use chatwrap::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatwrapError>;

/// The error type for all chatwrap operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatwrapError {
    /// No registered format candidate matched any sampled line.
    ///
    /// This is fatal for the document: parsing aborts with zero records.
    /// It usually means the input is not a chat export at all, or uses a
    /// date notation the registry does not know.
    #[error(
        "unrecognized export format: none of the {candidates} known line grammars \
         matched the sampled lines"
    )]
    UnrecognizedFormat {
        /// Number of format candidates that were tried.
        candidates: usize,
    },

    /// Invalid date string in filter configuration.
    ///
    /// Date filters expect `YYYY-MM-DD`.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided.
        input: String,
        /// Expected format description.
        expected: &'static str,
    },
}

impl ChatwrapError {
    /// Creates an unrecognized-format error.
    pub fn unrecognized_format(candidates: usize) -> Self {
        ChatwrapError::UnrecognizedFormat { candidates }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatwrapError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is a format-detection failure.
    pub fn is_unrecognized_format(&self) -> bool {
        matches!(self, ChatwrapError::UnrecognizedFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatwrapError::InvalidDate { .. })
    }
}
