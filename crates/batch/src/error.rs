//! Batch Error Types
//!
//! Per-line canonicalization failures are not errors here; they are collected
//! into [`Plan::invalid`](crate::Plan::invalid). These cover whole-batch
//! conditions a caller has to act on.

use derive_more::{Display, Error};

/// A batch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for batch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The batch has no non-blank lines.
    #[display("paste at least one URL, one per line")]
    InputEmpty,
    /// Lines were given but none of them is a usable URL.
    #[display("no valid URLs found ({_0} invalid)")]
    NoValidUrls(#[error(not(source))] usize),
    /// The session file could not be serialized.
    Serialize,
    /// A timestamp could not be formatted.
    Timestamp,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
