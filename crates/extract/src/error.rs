//! Extraction Error Types
//!
//! Detectors themselves never fail; they either find URLs or report no
//! match. These errors are raised once per payload when routing comes up
//! empty, so no partial extraction is ever returned.

use crate::Format;
use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing about the payload's name, media type or content was recognised.
    #[display("unrecognized file format")]
    UnrecognizedFormat,
    /// The payload was routed to a detector which found no URLs in it.
    #[display("no URLs found in {_0} input")]
    NothingFound(#[error(not(source))] Format),
    /// URLs were found, but none survived canonicalization.
    #[display("{_0} input contained no valid URLs")]
    NoValidUrls(#[error(not(source))] Format),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Same bytes in, same answer out.
        false
    }
}
