use crate::error::{ErrorKind, Result};
use crate::manifest::{Exports, MANIFEST_VERSION, Manifest};
use crate::qr::{QrFormat, QrHandle, QrRender, QrRenderer};
use exn::{OptionExt, ResultExt};
use futures::future::join_all;
use linkfile_batch::{BatchItem, BatchOptions, Plan, timestamp};
use linkfile_export::{ExportRow, build_delimited_export, build_rows, build_structured_export, schema_from_options};
use linkfile_naming::{UsedNames, archive_name, link_filename, sanitize_base_name};
use linkfile_render::{OutputType, render, to_safe_http_url};
use std::io::{Cursor, Write};
use time::OffsetDateTime;
use tracing::instrument;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

pub const MANIFEST_NAME: &str = "manifest.json";
pub const CSV_EXPORT_NAME: &str = "export.csv";
pub const JSON_EXPORT_NAME: &str = "export.json";
pub const QR_FOLDER: &str = "qr/";

/// A finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// File name to save the archive under, ending in `.zip`.
    pub name: String,
    pub bytes: Vec<u8>,
    /// Entry names, in the order they were written.
    pub entries: Vec<String>,
    /// Number of link files, one per item.
    pub file_count: usize,
    /// Export rows, with file names matching the archive entries.
    pub export_rows: Vec<ExportRow>,
}

struct Entry {
    name: String,
    bytes: Vec<u8>,
}

impl Entry {
    fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }
}

/// Assembles link files, exports, QR images and a manifest into one ZIP.
///
/// Entries are written with a fixed timestamp, so the same inputs (including
/// [`created_at`](Self::created_at)) always produce the same bytes.
pub struct ArchiveBuilder {
    items: Vec<BatchItem>,
    output_type: OutputType,
    base_name: String,
    options: BatchOptions,
    qr: Option<QrHandle>,
    qr_render: QrRender,
    created_at: OffsetDateTime,
}

impl ArchiveBuilder {
    pub fn new(items: Vec<BatchItem>) -> Self {
        Self {
            items,
            output_type: OutputType::default(),
            base_name: String::new(),
            options: BatchOptions::default(),
            qr: None,
            qr_render: QrRender::default(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// The deduplicated items of `plan`, with its output type, base name and options.
    pub fn from_plan(plan: &Plan) -> Self {
        Self::new(plan.deduped.clone())
            .output_type(plan.output_type)
            .base_name(&plan.archive_base_name)
            .options(plan.options.clone())
    }

    #[must_use]
    pub fn output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Archive base name; `.zip` is added if missing, blank means `links`.
    #[must_use]
    pub fn base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    #[must_use]
    pub fn options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Renderer for QR files. Required when the options ask for QR codes.
    #[must_use]
    pub fn qr(mut self, renderer: QrHandle) -> Self {
        self.qr = Some(renderer);
        self
    }

    #[must_use]
    pub fn qr_render(mut self, qr_render: QrRender) -> Self {
        self.qr_render = qr_render;
        self
    }

    /// Timestamp written into the manifest. Defaults to now.
    #[must_use]
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the archive. Any failure aborts the whole build.
    #[instrument(skip(self), fields(items = self.items.len(), output = %self.output_type))]
    pub async fn build(self) -> Result<Archive> {
        let ext = self.output_type.extension();
        let mut used = UsedNames::new();
        let mut entries = Vec::new();
        for item in &self.items {
            let url = item.effective_url.as_str();
            let name = used.make_unique(link_filename(url, ext));
            entries.push(Entry::new(name, render(url, self.output_type).into_bytes()));
        }
        let file_count = entries.len();

        // Rows and files must agree on names, so rows take the archive's.
        let mut export_rows = build_rows(&self.items, self.output_type, self.options.dedupe_mode);
        for (row, entry) in export_rows.iter_mut().zip(&entries) {
            row.filename.clone_from(&entry.name);
        }

        if self.options.wants_qr() {
            let renderer = self.qr.as_deref().ok_or_raise(|| ErrorKind::QrUnavailable)?;
            let link_names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
            let qr_entries = self.qr_entries(renderer, &link_names).await?;
            entries.extend(qr_entries);
        }

        entries.push(Entry::new(MANIFEST_NAME, self.manifest(file_count)?));
        let schema = schema_from_options(&self.options);
        if self.options.export_csv {
            let csv = build_delimited_export(&export_rows, schema.as_ref()).or_raise(|| ErrorKind::Export)?;
            entries.push(Entry::new(CSV_EXPORT_NAME, csv));
        }
        if self.options.export_json {
            let json = build_structured_export(&export_rows, schema.as_ref()).or_raise(|| ErrorKind::Export)?;
            entries.push(Entry::new(JSON_EXPORT_NAME, json));
        }

        let bytes = write_zip(&entries)?;
        tracing::debug!(entries = entries.len(), bytes = bytes.len(), "Built archive");
        Ok(Archive {
            name: archive_name(&self.base_name),
            bytes,
            entries: entries.into_iter().map(|entry| entry.name).collect(),
            file_count,
            export_rows,
        })
    }

    /// QR files for every item, SVG before PNG, rendered concurrently.
    async fn qr_entries(&self, renderer: &dyn QrRenderer, link_names: &[&str]) -> Result<Vec<Entry>> {
        if self.items.is_empty() {
            exn::bail!(ErrorKind::NoQrItems);
        }
        let formats: Vec<QrFormat> = [(self.options.qr_svg, QrFormat::Svg), (self.options.qr_png, QrFormat::Png)]
            .into_iter()
            .filter_map(|(wanted, format)| wanted.then_some(format))
            .collect();
        let options = self.qr_render.clamped();

        let mut used = UsedNames::new();
        let mut jobs = Vec::new();
        for (idx, (item, link_name)) in self.items.iter().zip(link_names).enumerate() {
            let Some(url) = to_safe_http_url(item.effective_url.as_str()) else {
                tracing::warn!(url = item.effective_url.as_str(), "Skipping QR for unsafe URL");
                continue;
            };
            let stem = match link_name.rfind('.') {
                Some(dot) if dot > 0 => &link_name[..dot],
                _ => link_name,
            };
            let base = match stem.trim().is_empty() {
                true => format!("link_{}", idx + 1),
                false => sanitize_base_name(stem),
            };
            let base = used.make_unique_base(base);
            for format in &formats {
                jobs.push((format!("{QR_FOLDER}{base}.{}", format.extension()), url.clone(), *format));
            }
        }

        tracing::debug!(renderer = renderer.name(), jobs = jobs.len(), "Rendering QR codes");
        let rendered = join_all(jobs.iter().map(|(_, url, format)| renderer.render(url, *format, &options))).await;
        let mut entries = Vec::new();
        for ((name, url, _), result) in jobs.into_iter().zip(rendered) {
            let bytes = result.or_raise(|| ErrorKind::QrFailed(url))?;
            if !bytes.is_empty() {
                entries.push(Entry::new(name, bytes));
            }
        }
        if entries.is_empty() {
            let sample = self.items.first().map(|item| item.effective_url.to_string()).unwrap_or_default();
            exn::bail!(ErrorKind::NoQrOutput(sample));
        }
        Ok(entries)
    }

    fn manifest(&self, link_file_count: usize) -> Result<String> {
        let manifest = Manifest {
            version: MANIFEST_VERSION,
            created_at: timestamp(self.created_at).or_raise(|| ErrorKind::Manifest)?,
            output_type: self.output_type,
            link_file_count,
            exports: Exports::from(&self.options),
            options: &self.options,
        };
        let mut json = serde_json::to_string_pretty(&manifest).or_raise(|| ErrorKind::Manifest)?;
        json.push('\n');
        Ok(json)
    }
}

fn write_zip(entries: &[Entry]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        zip.start_file(entry.name.as_str(), options).or_raise(|| ErrorKind::Zip)?;
        zip.write_all(&entry.bytes).or_raise(|| ErrorKind::Zip)?;
    }
    Ok(zip.finish().or_raise(|| ErrorKind::Zip)?.into_inner())
}
