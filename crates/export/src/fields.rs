use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One column of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Raw,
    EffectiveUrl,
    NormalizedUrl,
    Filename,
    Type,
    Host,
    Path,
    Query,
    DedupeKey,
    Source,
}

/// Human-facing description of a [`FieldKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub key: FieldKey,
    pub label: &'static str,
    pub description: &'static str,
}

/// Every exportable field, in the order they are offered.
pub const CATALOGUE: [FieldInfo; 10] = [
    FieldInfo {
        key: FieldKey::Raw,
        label: "Raw input",
        description: "Exactly what was pasted or imported, unchanged.",
    },
    FieldInfo {
        key: FieldKey::EffectiveUrl,
        label: "URL (effective)",
        description: "The URL actually written, after the privacy mode.",
    },
    FieldInfo {
        key: FieldKey::NormalizedUrl,
        label: "URL (normalized)",
        description: "The canonical URL before the privacy mode.",
    },
    FieldInfo { key: FieldKey::Filename, label: "Filename", description: "The file name generated for this link." },
    FieldInfo { key: FieldKey::Type, label: "File type", description: "The link file format: html, url or webloc." },
    FieldInfo { key: FieldKey::Host, label: "Host", description: "The host of the URL, with a port if it has one." },
    FieldInfo { key: FieldKey::Path, label: "Path", description: "The URL path, without the query string." },
    FieldInfo { key: FieldKey::Query, label: "Query", description: "The query string, without the leading `?`." },
    FieldInfo {
        key: FieldKey::DedupeKey,
        label: "Dedupe key",
        description: "The value used to decide whether two URLs are duplicates.",
    },
    FieldInfo { key: FieldKey::Source, label: "Source", description: "Where the URL came from." },
];

impl FieldKey {
    /// Key as used in JSON exports and saved options.
    pub fn key(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::EffectiveUrl => "effectiveUrl",
            Self::NormalizedUrl => "normalizedUrl",
            Self::Filename => "filename",
            Self::Type => "type",
            Self::Host => "host",
            Self::Path => "path",
            Self::Query => "query",
            Self::DedupeKey => "dedupeKey",
            Self::Source => "source",
        }
    }

    /// CSV column header.
    pub fn csv_header(self) -> &'static str {
        match self {
            Self::EffectiveUrl => "effective_url",
            Self::NormalizedUrl => "normalized_url",
            other => other.key(),
        }
    }

    pub fn info(self) -> &'static FieldInfo {
        // Every key has exactly one catalogue entry, in declaration order.
        &CATALOGUE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match CATALOGUE.iter().find(|info| info.key.key() == s) {
            Some(info) => Ok(info.key),
            None => exn::bail!(ErrorKind::UnknownField(s.to_string())),
        }
    }
}

const DEFAULT_FIELDS: [FieldKey; 4] = [FieldKey::Raw, FieldKey::EffectiveUrl, FieldKey::Filename, FieldKey::Type];

/// An ordered, duplicate-free, never-empty selection of export fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExportSchema(Vec<FieldKey>);

impl Default for ExportSchema {
    fn default() -> Self {
        Self(DEFAULT_FIELDS.to_vec())
    }
}

impl ExportSchema {
    /// Build from user-supplied keys. Unknown and repeated keys are dropped;
    /// if nothing is left, the default selection is used.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut fields = Vec::new();
        for key in keys {
            match key.as_ref().parse::<FieldKey>() {
                Ok(field) if !fields.contains(&field) => fields.push(field),
                Ok(_) => {},
                Err(_) => tracing::debug!(key = key.as_ref(), "Ignoring unknown export field"),
            }
        }
        Self::from_fields(fields)
    }

    fn from_fields(fields: Vec<FieldKey>) -> Self {
        match fields.is_empty() {
            true => Self::default(),
            false => Self(fields),
        }
    }

    pub fn fields(&self) -> &[FieldKey] {
        &self.0
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        self.0.contains(&field)
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_FIELDS
    }

    /// Key strings, as stored in [`BatchOptions::export_fields`](linkfile_batch::BatchOptions::export_fields).
    pub fn keys(&self) -> Vec<String> {
        self.0.iter().map(|field| field.key().to_string()).collect()
    }

    /// Select (appending at the end) or deselect a field.
    pub fn toggle(&mut self, field: FieldKey, on: bool) {
        match (on, self.contains(field)) {
            (true, false) => self.0.push(field),
            (false, true) => self.remove(field),
            _ => {},
        }
    }

    /// Deselect a field. Removing the last one restores the default selection.
    pub fn remove(&mut self, field: FieldKey) {
        let fields = self.0.iter().copied().filter(|f| *f != field).collect();
        *self = Self::from_fields(fields);
    }

    /// Move the field at `from` so that it lands before the field currently
    /// at `to`, the way a drag and drop would. `to` may be `len()` to move
    /// to the end; larger values are clamped.
    pub fn move_field(&mut self, from: usize, to: usize) {
        if from >= self.0.len() {
            return;
        }
        let field = self.0.remove(from);
        let to = match from < to {
            true => to - 1,
            false => to,
        };
        self.0.insert(to.min(self.0.len()), field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_catalogue_matches_keys() {
        for (index, info) in CATALOGUE.iter().enumerate() {
            assert_eq!(info.key as usize, index);
            assert_eq!(info.key.key().parse::<FieldKey>().unwrap(), info.key);
            assert_eq!(serde_json_key(info.key), info.key.key());
        }
    }

    fn serde_json_key(field: FieldKey) -> String {
        match serde_json::to_value(field).unwrap() {
            serde_json::Value::String(s) => s,
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = "Host".parse::<FieldKey>().unwrap_err();
        assert_eq!(*err, ErrorKind::UnknownField("Host".into()));
    }

    #[rstest]
    #[case(&[], &[FieldKey::Raw, FieldKey::EffectiveUrl, FieldKey::Filename, FieldKey::Type])]
    #[case(&["bogus"], &[FieldKey::Raw, FieldKey::EffectiveUrl, FieldKey::Filename, FieldKey::Type])]
    #[case(&["host", "raw", "host", "nope", "dedupeKey"], &[FieldKey::Host, FieldKey::Raw, FieldKey::DedupeKey])]
    fn test_from_keys(#[case] keys: &[&str], #[case] expected: &[FieldKey]) {
        assert_eq!(ExportSchema::from_keys(keys).fields(), expected);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut schema = ExportSchema::default();
        assert!(schema.is_default());
        schema.toggle(FieldKey::Host, true);
        schema.toggle(FieldKey::Host, true);
        schema.toggle(FieldKey::Raw, false);
        assert_eq!(schema.keys(), ["effectiveUrl", "filename", "type", "host"]);
        assert!(!schema.is_default());

        for field in [FieldKey::EffectiveUrl, FieldKey::Filename, FieldKey::Type, FieldKey::Host] {
            schema.remove(field);
        }
        assert!(schema.is_default());
    }

    #[rstest]
    // Dragging down lands before the target, which shifts up by one.
    #[case(0, 2, &["effectiveUrl", "raw", "filename", "type"])]
    #[case(0, 4, &["effectiveUrl", "filename", "type", "raw"])]
    #[case(0, 99, &["effectiveUrl", "filename", "type", "raw"])]
    #[case(3, 0, &["type", "raw", "effectiveUrl", "filename"])]
    #[case(2, 2, &["raw", "effectiveUrl", "filename", "type"])]
    #[case(9, 0, &["raw", "effectiveUrl", "filename", "type"])]
    fn test_move_field(#[case] from: usize, #[case] to: usize, #[case] expected: &[&str]) {
        let mut schema = ExportSchema::default();
        schema.move_field(from, to);
        assert_eq!(schema.keys(), expected);
    }
}
