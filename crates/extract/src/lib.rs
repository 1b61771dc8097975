//! URL extraction from whatever a user drops in.
//!
//! A [`Payload`] is routed to one [`Format`] detector: the declared extension
//! or media type wins, otherwise content signatures are tried in order and
//! the first detector to find something is used. [`import`] then
//! canonicalizes the candidates, and [`ApplyImport`] merges the result into a
//! caller's [`Session`](linkfile_batch::Session).

mod consts;
mod detect;
pub mod error;
mod format;
mod import;
mod payload;

pub use crate::detect::Detected;
pub use crate::format::Format;
pub use crate::import::{ApplyImport, Imported, import};
pub use crate::payload::Payload;
use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use tracing::instrument;

/// What came out of a payload, and which detector produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub format: Format,
    pub detected: Detected,
}

/// Route `payload` to a detector and run it.
///
/// A declared format is trusted: if its detector finds nothing, no other
/// detector is tried.
///
/// ```
/// use linkfile_extract::{Detected, Format, Payload, extract};
///
/// let payload = Payload::new("[InternetShortcut]\r\nURL=https://example.com/\r\n");
/// let extracted = extract(&payload).unwrap();
/// assert_eq!(extracted.format, Format::InternetShortcut);
/// assert_eq!(extracted.detected, Detected::Urls(vec!["https://example.com/".into()]));
/// ```
#[instrument(skip(payload), fields(name = payload.name(), bytes = payload.text().len()))]
pub fn extract(payload: &Payload) -> Result<Extracted> {
    let text = payload.text();
    if let Some(format) = Format::declared(payload) {
        tracing::debug!(%format, "Using declared format");
        let detected = format.detect(text).ok_or_raise(|| ErrorKind::NothingFound(format))?;
        return Ok(Extracted { format, detected });
    }
    let (format, detected) = Format::sniff(text).ok_or_raise(|| ErrorKind::UnrecognizedFormat)?;
    tracing::debug!(%format, "Sniffed format");
    Ok(Extracted { format, detected })
}
