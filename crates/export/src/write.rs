use crate::error::{ErrorKind, Result};
use crate::fields::{ExportSchema, FieldKey};
use crate::rows::ExportRow;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use exn::ResultExt;
use serde_json::{Map, Value};
use tracing::instrument;

/// Columns written to CSV when no schema is given.
const DEFAULT_CSV_FIELDS: [FieldKey; 5] =
    [FieldKey::Raw, FieldKey::EffectiveUrl, FieldKey::NormalizedUrl, FieldKey::Filename, FieldKey::Type];

/// CSV with a header row, `\n` line endings and a trailing newline.
///
/// Values are only quoted when they contain a quote, comma or line break.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn build_delimited_export(rows: &[ExportRow], schema: Option<&ExportSchema>) -> Result<String> {
    let fields = schema.map_or(&DEFAULT_CSV_FIELDS[..], ExportSchema::fields);
    let mut builder = WriterBuilder::new();
    builder.quote_style(QuoteStyle::Necessary).terminator(Terminator::Any(b'\n'));
    let mut out = Vec::new();
    let header: Vec<&str> = fields.iter().map(|field| field.csv_header()).collect();
    write_line(&builder, &mut out, &header)?;
    for row in rows {
        let values: Vec<&str> = fields.iter().map(|field| row.get(*field)).collect();
        write_line(&builder, &mut out, &values)?;
    }
    String::from_utf8(out).or_raise(|| ErrorKind::Delimited)
}

fn write_line(builder: &WriterBuilder, out: &mut Vec<u8>, record: &[&str]) -> Result<()> {
    // csv quotes a lone empty field so the line is not read back as blank; a missing value stays blank here.
    if let [""] = record {
        out.push(b'\n');
        return Ok(());
    }
    let mut writer = builder.from_writer(out);
    writer.write_record(record).or_raise(|| ErrorKind::Delimited)?;
    writer.flush().or_raise(|| ErrorKind::Delimited)
}

/// Pretty JSON array with a trailing newline.
///
/// With a schema, each row becomes an object holding exactly those keys in
/// that order; without one, every field is written.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn build_structured_export(rows: &[ExportRow], schema: Option<&ExportSchema>) -> Result<String> {
    let mut json = match schema {
        None => serde_json::to_string_pretty(rows),
        Some(schema) => {
            let projected: Vec<Map<String, Value>> = rows
                .iter()
                .map(|row| {
                    schema
                        .fields()
                        .iter()
                        .map(|field| (field.key().to_string(), Value::from(row.get(*field))))
                        .collect()
                })
                .collect();
            serde_json::to_string_pretty(&projected)
        },
    }
    .or_raise(|| ErrorKind::Structured)?;
    json.push('\n');
    Ok(json)
}
