//! Tabular exports of a plan.
//!
//! [`build_export_rows`] turns the deduplicated items of a
//! [`Plan`](linkfile_batch::Plan) into [`ExportRow`]s holding every field of
//! the catalogue; [`build_delimited_export`] and [`build_structured_export`]
//! write them out, optionally projected through an [`ExportSchema`].

pub mod error;
mod fields;
mod rows;
mod write;

pub use crate::fields::{CATALOGUE, ExportSchema, FieldInfo, FieldKey};
pub use crate::rows::{ExportRow, MANUAL_SOURCE, build_export_rows, build_rows};
pub use crate::write::{build_delimited_export, build_structured_export};

/// Schema chosen in the batch options, or `None` for the format defaults.
pub fn schema_from_options(options: &linkfile_batch::BatchOptions) -> Option<ExportSchema> {
    match options.export_fields.is_empty() {
        true => None,
        false => Some(ExportSchema::from_keys(&options.export_fields)),
    }
}
