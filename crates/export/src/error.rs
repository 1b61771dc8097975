//! Export Error Types

use derive_more::{Display, Error};

/// An export error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A row could not be written as CSV.
    #[display("could not write CSV export")]
    Delimited,
    /// Rows could not be written as JSON.
    #[display("could not write JSON export")]
    Structured,
    /// An export field key outside the catalogue.
    #[display("unknown export field: {_0}")]
    UnknownField(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
