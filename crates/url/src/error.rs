//! Canonicalization failures.
//!
//! A line that fails to canonicalize is an expected outcome of batch input,
//! not an exceptional one, so these are plain values rather than `exn` trees.
//! Planners collect them per line alongside the raw input.

use derive_more::{Display, Error};

/// Why a raw string could not be turned into a [`NormalizedUrl`](crate::NormalizedUrl).
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum Invalid {
    /// Nothing left after trimming whitespace and wrapping punctuation.
    #[display("please enter a URL")]
    Empty,
    /// The URL parser rejected the input outright.
    #[display("that does not look like a valid URL")]
    Malformed,
    /// Parsed fine, but the scheme is something other than `http`/`https`.
    #[display("only http:// and https:// URLs are supported")]
    UnsupportedScheme(#[error(not(source))] String),
    /// The host is not localhost, an IP address, or a plausible dotted domain.
    #[display("that does not look like a valid web address")]
    InvalidHost(#[error(not(source))] String),
}

impl Invalid {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Canonicalization is a pure function of its input.
        false
    }
}

/// A mode selector string that names no known mode.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
#[display("unknown mode: {_0}")]
pub struct UnknownMode(#[error(not(source))] pub String);
