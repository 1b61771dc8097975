use crate::error::{ErrorKind, Result};
use crate::options::BatchOptions;
use linkfile_naming::archive_name;
use linkfile_render::OutputType;
use linkfile_url::{DedupeMode, Invalid, NormalizedUrl, PrivacyMode, dedupe_key, normalize};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use tracing::instrument;

pub(crate) const DEFAULT_ARCHIVE_BASE_NAME: &str = "links";

/// One input line that canonicalized successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub raw: String,
    /// Canonical URL with the privacy mode applied. This is what gets written.
    pub effective_url: NormalizedUrl,
    /// Canonical URL before the privacy mode was applied.
    pub normalized_url: NormalizedUrl,
}

/// One input line that did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidItem {
    pub raw: String,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: Invalid,
}

fn serialize_reason<S: Serializer>(reason: &Invalid, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// Everything derived from one batch of input, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Trimmed, non-blank input lines.
    pub lines: Vec<String>,
    pub valid: Vec<BatchItem>,
    pub invalid: Vec<InvalidItem>,
    /// `valid` minus later duplicates; equal to `valid` when dedupe is off.
    pub deduped: Vec<BatchItem>,
    /// `valid.len() - deduped.len()`.
    pub removed_count: usize,
    pub options: BatchOptions,
    pub privacy: PrivacyMode,
    pub output_type: OutputType,
    pub archive_base_name: String,
}

impl Plan {
    #[must_use]
    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Set the archive base name; blank names fall back to `links`.
    #[must_use]
    pub fn with_archive_base_name(mut self, name: impl AsRef<str>) -> Self {
        self.archive_base_name = match name.as_ref().trim() {
            "" => DEFAULT_ARCHIVE_BASE_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        self
    }

    /// File name the archive for this plan will be saved under.
    pub fn archive_name(&self) -> String {
        archive_name(&self.archive_base_name)
    }

    /// Fails with [`ErrorKind::InputEmpty`] if no lines were given.
    pub fn require_lines(&self) -> Result<&Self> {
        if self.lines.is_empty() {
            exn::bail!(ErrorKind::InputEmpty);
        }
        Ok(self)
    }

    /// Like [`require_lines`](Self::require_lines), and also fails with
    /// [`ErrorKind::NoValidUrls`] if nothing survived canonicalization.
    pub fn require_valid(&self) -> Result<&Self> {
        self.require_lines()?;
        if self.deduped.is_empty() {
            exn::bail!(ErrorKind::NoValidUrls(self.invalid.len()));
        }
        Ok(self)
    }
}

/// Split batch text into trimmed, non-blank lines. Any newline convention.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r']).map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
}

/// Canonicalize and partition `text`, then dedupe per `options`.
///
/// Order is preserved throughout. The result uses the default output type
/// and archive base name; see [`Plan::with_output_type`] and
/// [`Plan::with_archive_base_name`].
///
/// ```
/// use linkfile_batch::{BatchOptions, build_plan};
/// use linkfile_url::{DedupeMode, PrivacyMode};
///
/// let options = BatchOptions { dedupe_mode: DedupeMode::Loose, ..Default::default() };
/// let plan = build_plan("example.com\nhttp://example.com/\nEXAMPLE.COM\nnot a url", &options, PrivacyMode::Full);
/// assert_eq!(plan.valid.len(), 3);
/// assert_eq!(plan.deduped.len(), 1);
/// assert_eq!(plan.removed_count, 2);
/// assert_eq!(plan.invalid[0].raw, "not a url");
/// ```
#[instrument(skip(text, options), fields(text_len = text.len(), privacy = %privacy))]
pub fn build_plan(text: &str, options: &BatchOptions, privacy: PrivacyMode) -> Plan {
    let lines = parse_lines(text);
    let mut valid = Vec::with_capacity(lines.len());
    let mut invalid = Vec::new();
    for raw in &lines {
        match normalize(raw) {
            Ok(normalized_url) => valid.push(BatchItem {
                raw: raw.clone(),
                effective_url: privacy.apply(&normalized_url),
                normalized_url,
            }),
            Err(reason) => invalid.push(InvalidItem { raw: raw.clone(), reason }),
        }
    }

    let deduped = match options.dedupe {
        true => dedupe(&valid, options.dedupe_mode),
        false => valid.clone(),
    };
    let removed_count = valid.len() - deduped.len();
    tracing::debug!(
        lines = lines.len(),
        valid = valid.len(),
        invalid = invalid.len(),
        removed = removed_count,
        "Batch planned"
    );
    Plan {
        lines,
        valid,
        invalid,
        deduped,
        removed_count,
        options: options.clone(),
        privacy,
        output_type: OutputType::default(),
        archive_base_name: DEFAULT_ARCHIVE_BASE_NAME.to_string(),
    }
}

/// First occurrence wins.
pub fn dedupe(items: &[BatchItem], mode: DedupeMode) -> Vec<BatchItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().filter(|item| seen.insert(dedupe_key(item.effective_url.as_str(), mode))).cloned().collect()
}

/// Canonicalize imported URL candidates, dropping failures and exact
/// duplicates. Privacy modes are not applied.
pub fn normalize_unique<I>(urls: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter_map(|raw| normalize(raw.as_ref()).ok())
        .map(|url| url.as_str().to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
