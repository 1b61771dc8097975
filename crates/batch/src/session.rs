use crate::error::{ErrorKind, Result};
use crate::options::BatchOptions;
use crate::plan::{DEFAULT_ARCHIVE_BASE_NAME, Plan, build_plan};
use exn::ResultExt;
use linkfile_render::OutputType;
use linkfile_url::PrivacyMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Tag identifying a saved session file.
pub const BATCH_FILE_KIND: &str = "link-file-generator-batch";
/// The only session file version understood.
pub const BATCH_FILE_VERSION: u64 = 1;

/// Everything a caller holds between pipeline calls.
///
/// Nothing in this workspace keeps state of its own; a front end keeps one of
/// these, builds plans from it and merges imports into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    /// Raw batch text, one URL per line.
    pub text: String,
    pub output_type: OutputType,
    pub archive_base_name: String,
    pub options: BatchOptions,
    pub privacy: PrivacyMode,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            text: String::new(),
            output_type: OutputType::default(),
            archive_base_name: DEFAULT_ARCHIVE_BASE_NAME.to_string(),
            options: BatchOptions::default(),
            privacy: PrivacyMode::default(),
        }
    }
}

/// What to do with the batch text when lines arrive from an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Throw the current text away.
    #[default]
    Replace,
    /// Keep the current text and add the new lines after it.
    Append,
}

impl Session {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn plan(&self) -> Plan {
        build_plan(&self.text, &self.options, self.privacy)
            .with_output_type(self.output_type)
            .with_archive_base_name(&self.archive_base_name)
    }

    /// Merge `lines` into the batch text.
    ///
    /// Blank lines are dropped. Appending to blank text behaves like replacing.
    pub fn merge_lines<I>(&mut self, lines: I, mode: MergeMode)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let block = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        match mode {
            MergeMode::Append if block.is_empty() => {},
            MergeMode::Append if !self.text.trim().is_empty() => {
                self.text = format!("{}\n{block}", self.text.trim_end());
            },
            _ => self.text = block,
        }
    }

    /// Replace this session with the contents of a saved session file.
    ///
    /// Output type and base name are only taken when present; options are
    /// overlaid field by field.
    pub fn restore(&mut self, file: &BatchFile) {
        self.text = file.input.lines.join("\n");
        if let Some(output_type) = file.output_type {
            self.output_type = output_type;
        }
        if let Some(name) = file.zip_base_name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
            self.archive_base_name = name.to_string();
        }
        self.options.merge_value(&file.options);
    }

    /// Snapshot this session as a session file.
    pub fn to_batch_file(&self, created_at: OffsetDateTime) -> Result<BatchFile> {
        BatchFile::from_plan(&self.plan(), created_at)
    }
}

/// Self-describing saved session.
///
/// Only recognised when both [`kind`](Self::kind) and
/// [`version`](Self::version) match exactly; see [`BatchFile::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFile {
    pub version: u64,
    pub kind: String,
    pub created_at: String,
    /// Kept as loosely typed JSON so unknown or mistyped keys survive parsing.
    pub options: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_type: Option<OutputType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_base_name: Option<String>,
    pub input: BatchInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchInput {
    pub lines: Vec<String>,
}

impl BatchFile {
    /// Snapshot the inputs of a plan: its lines, options and output settings.
    pub fn from_plan(plan: &Plan, created_at: OffsetDateTime) -> Result<Self> {
        Ok(Self {
            version: BATCH_FILE_VERSION,
            kind: BATCH_FILE_KIND.to_string(),
            created_at: timestamp(created_at)?,
            options: serde_json::to_value(&plan.options).or_raise(|| ErrorKind::Serialize)?,
            output_type: Some(plan.output_type),
            zip_base_name: Some(plan.archive_base_name.clone()),
            input: BatchInput { lines: plan.lines.clone() },
        })
    }

    /// Recognise a parsed JSON document as a session file.
    ///
    /// Returns `None` unless `kind` and `version` match and `input.lines` is
    /// an array. Everything else is read leniently.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.get("kind").and_then(Value::as_str) != Some(BATCH_FILE_KIND)
            || object.get("version").and_then(Value::as_u64) != Some(BATCH_FILE_VERSION)
        {
            return None;
        }
        let lines = object.get("input")?.get("lines")?.as_array()?;
        let lines = lines
            .iter()
            .map(|line| match line {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();
        Some(Self {
            version: BATCH_FILE_VERSION,
            kind: BATCH_FILE_KIND.to_string(),
            created_at: object.get("createdAt").and_then(Value::as_str).unwrap_or_default().to_string(),
            options: object.get("options").cloned().unwrap_or(Value::Null),
            output_type: object.get("outputType").and_then(Value::as_str).and_then(|s| s.parse().ok()),
            zip_base_name: object.get("zipBaseName").and_then(Value::as_str).map(str::to_string),
            input: BatchInput { lines },
        })
    }

    /// Pretty JSON with two-space indent and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).or_raise(|| ErrorKind::Serialize)?;
        json.push('\n');
        Ok(json)
    }
}

/// RFC 3339 timestamp as written into session files and manifests.
pub fn timestamp(at: OffsetDateTime) -> Result<String> {
    at.format(&Rfc3339).or_raise(|| ErrorKind::Timestamp)
}
