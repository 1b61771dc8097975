use crate::fields::FieldKey;
use linkfile_batch::{BatchItem, Plan};
use linkfile_naming::{UsedNames, link_filename};
use linkfile_render::OutputType;
use linkfile_url::{DedupeMode, dedupe_key};
use serde::Serialize;
use tracing::instrument;

/// Where rows built from a plan say they came from.
pub const MANUAL_SOURCE: &str = "manual";

/// Every exportable field of one link, as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub raw: String,
    pub effective_url: String,
    pub normalized_url: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub output_type: String,
    pub host: String,
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
    pub dedupe_key: String,
    pub source: String,
}

impl ExportRow {
    pub fn get(&self, field: FieldKey) -> &str {
        match field {
            FieldKey::Raw => &self.raw,
            FieldKey::EffectiveUrl => &self.effective_url,
            FieldKey::NormalizedUrl => &self.normalized_url,
            FieldKey::Filename => &self.filename,
            FieldKey::Type => &self.output_type,
            FieldKey::Host => &self.host,
            FieldKey::Path => &self.path,
            FieldKey::Query => &self.query,
            FieldKey::DedupeKey => &self.dedupe_key,
            FieldKey::Source => &self.source,
        }
    }
}

/// One row per deduplicated item of `plan`, in plan order.
pub fn build_export_rows(plan: &Plan) -> Vec<ExportRow> {
    build_rows(&plan.deduped, plan.output_type, plan.options.dedupe_mode)
}

/// One row per item, with file names made unique within this call.
#[instrument(skip(items), fields(items = items.len(), output = %output_type))]
pub fn build_rows(items: &[BatchItem], output_type: OutputType, dedupe_mode: DedupeMode) -> Vec<ExportRow> {
    let mut used = UsedNames::new();
    items
        .iter()
        .map(|item| {
            let url = item.effective_url.as_url();
            ExportRow {
                raw: item.raw.clone(),
                effective_url: item.effective_url.to_string(),
                normalized_url: item.normalized_url.to_string(),
                filename: used.make_unique(link_filename(url.as_str(), output_type.extension())),
                output_type: output_type.as_str().to_string(),
                host: item.effective_url.host_with_port(),
                path: url.path().to_string(),
                query: url.query().unwrap_or_default().to_string(),
                dedupe_key: dedupe_key(url.as_str(), dedupe_mode),
                source: MANUAL_SOURCE.to_string(),
            }
        })
        .collect()
}
