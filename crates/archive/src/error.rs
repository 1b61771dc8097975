//! Archive Error Types
//!
//! Building an archive is all or nothing: any of these aborts the build and
//! no partial archive is returned.

use derive_more::{Display, Error};

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// QR codes were requested but no renderer was supplied.
    #[display("QR requested, but no QR renderer is available")]
    QrUnavailable,
    /// QR codes were requested for an empty batch.
    #[display("QR requested, but there were no ZIP items to generate QR codes for.")]
    NoQrItems,
    /// The renderer failed for one URL.
    #[display("QR rendering failed for {_0}")]
    QrFailed(#[error(not(source))] String),
    /// The renderer ran but produced nothing at all.
    #[display("QR requested, but no QR files were generated. Sample URL: {_0}")]
    NoQrOutput(#[error(not(source))] String),
    /// A CSV or JSON export could not be built.
    #[display("could not build export")]
    Export,
    /// The manifest could not be built.
    #[display("could not build manifest")]
    Manifest,
    /// The ZIP container could not be written.
    #[display("could not write ZIP archive")]
    Zip,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QrFailed(_))
    }
}
