use super::{Detected, found};
use linkfile_batch::parse_lines;

/// Plain list: every trimmed, non-blank line is a candidate.
pub(crate) fn detect(text: &str) -> Option<Detected> {
    found(parse_lines(text))
}
