//! Export command: CSV or JSON rows for a batch.

use crate::cli::io::write_output;
use crate::cli::{ExportArgs, ExportFormat};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use linkfile_batch::Session;
use linkfile_config::Config;
use linkfile_export::{
    FieldKey, build_delimited_export, build_export_rows, build_structured_export, schema_from_options,
};

pub fn run_export(config: &Config, args: &ExportArgs) -> Result<()> {
    let mut session = args.batch.session(config)?;
    if !args.fields.is_empty() {
        for key in &args.fields {
            key.parse::<FieldKey>().or_raise(|| ErrorKind::Export)?;
        }
        session.options.export_fields = args.fields.clone();
    }
    let text = export(&session, args.format)?;
    write_output(args.output.output.as_deref(), text.as_bytes())
}

/// Rows for the deduplicated items, projected through the session's export fields.
pub fn export(session: &Session, format: ExportFormat) -> Result<String> {
    let plan = session.plan();
    plan.require_valid().or_raise(|| ErrorKind::Batch)?;
    let rows = build_export_rows(&plan);
    let schema = schema_from_options(&plan.options);
    match format {
        ExportFormat::Csv => build_delimited_export(&rows, schema.as_ref()),
        ExportFormat::Json => build_structured_export(&rows, schema.as_ref()),
    }
    .or_raise(|| ErrorKind::Export)
}
