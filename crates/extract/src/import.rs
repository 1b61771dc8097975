use crate::error::{ErrorKind, Result};
use crate::format::Format;
use crate::payload::Payload;
use crate::{Detected, extract};
use linkfile_batch::{BatchFile, MergeMode, Session, normalize_unique};
use tracing::instrument;

/// The outcome of importing one payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Imported {
    /// Canonical, de-duplicated URLs in document order.
    Urls {
        format: Format,
        urls: Vec<String>,
        /// Candidates that failed canonicalization or repeated an earlier one.
        dropped: usize,
    },
    /// A saved session, untouched.
    Session(BatchFile),
}

/// Detect, then canonicalize and exact-dedupe the candidates.
///
/// Privacy modes are never applied here; they belong to planning.
#[instrument(skip(payload), fields(name = payload.name(), bytes = payload.text().len()))]
pub fn import(payload: &Payload) -> Result<Imported> {
    let extracted = extract(payload)?;
    match extracted.detected {
        Detected::Session(file) => Ok(Imported::Session(file)),
        Detected::Urls(candidates) => {
            let urls = normalize_unique(&candidates);
            let dropped = candidates.len() - urls.len();
            if dropped > 0 {
                tracing::debug!(dropped, kept = urls.len(), "Dropped import candidates");
            }
            if urls.is_empty() {
                exn::bail!(ErrorKind::NoValidUrls(extracted.format));
            }
            Ok(Imported::Urls { format: extracted.format, urls, dropped })
        },
    }
}

/// Merge an import into caller-held state.
pub trait ApplyImport {
    fn apply_import(&mut self, imported: &Imported, mode: MergeMode);
}

impl ApplyImport for Session {
    /// URL lists replace or append to the batch text. A session file in
    /// replace mode restores everything it carries; in append mode only its
    /// canonical lines are added.
    fn apply_import(&mut self, imported: &Imported, mode: MergeMode) {
        match (imported, mode) {
            (Imported::Urls { urls, .. }, mode) => self.merge_lines(urls, mode),
            (Imported::Session(file), MergeMode::Replace) => self.restore(file),
            (Imported::Session(file), MergeMode::Append) => {
                self.merge_lines(normalize_unique(&file.input.lines), MergeMode::Append)
            },
        }
    }
}
