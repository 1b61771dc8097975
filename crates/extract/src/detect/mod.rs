//! One detector per ingestible shape.
//!
//! Every detector is a pure `fn(&str) -> Option<Detected>`: total, never
//! panicking, returning `None` when the text holds nothing it recognises.

pub(crate) mod delimited;
pub(crate) mod lines;
pub(crate) mod markup;
pub(crate) mod shortcut;
pub(crate) mod structured;

use crate::consts::{URL_DOMAIN_REGEX, URL_SCHEME_REGEX, URL_WWW_REGEX};
use linkfile_batch::BatchFile;

/// What a detector found.
#[derive(Debug, Clone, PartialEq)]
pub enum Detected {
    /// Candidate URL strings in document order, not yet canonicalized.
    Urls(Vec<String>),
    /// A saved session, passed through untouched.
    Session(BatchFile),
}

/// Wrap a non-empty list; empty lists are "no match".
pub(crate) fn found(urls: Vec<String>) -> Option<Detected> {
    match urls.is_empty() {
        true => None,
        false => Some(Detected::Urls(urls)),
    }
}

/// Cheap pre-filter for cells and values that might be URLs.
///
/// True for scheme-prefixed or `www.`-prefixed text, or a whitespace-free
/// token containing something like `label.tld`.
pub(crate) fn looks_url_like(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    URL_SCHEME_REGEX.is_match(value)
        || URL_WWW_REGEX.is_match(value)
        || (URL_DOMAIN_REGEX.is_match(value) && !value.contains(char::is_whitespace))
}
