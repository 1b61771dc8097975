use linkfile_batch::BatchOptions;
use linkfile_render::OutputType;
use serde::Serialize;

pub(crate) const MANIFEST_VERSION: u32 = 1;

/// `manifest.json`: what the archive holds and the options it was built with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Manifest<'a> {
    pub version: u32,
    pub created_at: String,
    pub output_type: OutputType,
    /// Link files only; exports, QR files and the manifest are not counted.
    pub link_file_count: usize,
    pub exports: Exports,
    pub options: &'a BatchOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Exports {
    pub csv: bool,
    pub json: bool,
    pub qr_png: bool,
    pub qr_svg: bool,
}

impl From<&BatchOptions> for Exports {
    fn from(options: &BatchOptions) -> Self {
        Self { csv: options.export_csv, json: options.export_json, qr_png: options.qr_png, qr_svg: options.qr_svg }
    }
}
