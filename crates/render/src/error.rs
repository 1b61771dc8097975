//! Render Error Types
//!
//! Renderers themselves never fail: unsafe URLs degrade to placeholder
//! artifacts. These errors cover the edges around them, such as choosing an
//! output type by name or preparing a single download.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Output type name not recognised.
    #[display("unsupported output type: {_0}")]
    UnsupportedOutput(#[error(not(source))] String),
    /// The URL given for a single download did not canonicalize.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// Embedded asset was not found.
    #[display("asset not found: {_0}")]
    AssetNotFound(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
