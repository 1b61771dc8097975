//! Import command: detect a file's format and pull URLs out of it.

use crate::cli::args::saved_session;
use crate::cli::io::{read_bytes, read_input, write_output};
use crate::cli::{BatchArgs, ImportArgs};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use linkfile_batch::MergeMode;
use linkfile_config::Config;
use linkfile_extract::{ApplyImport, Imported, Payload, import};
use time::OffsetDateTime;

pub fn run_import(config: &Config, args: &ImportArgs) -> Result<()> {
    let bytes = read_bytes(Some(&args.file))?;
    let mut payload = Payload::from_bytes(&bytes);
    if let Some(name) = args.file.file_name() {
        payload = payload.with_name(name.to_string_lossy());
    }
    let imported = import(&payload).or_raise(|| ErrorKind::Import(args.file.display().to_string()))?;
    eprintln!("{}", describe(&imported));

    let text = match &args.into {
        Some(target) => {
            let existing = read_input(Some(target))?;
            merge_into(config, &existing, &imported, args.merge_mode(), OffsetDateTime::now_utc())?
        },
        None => list(&imported),
    };
    write_output(args.output.output.as_deref(), text.as_bytes())
}

pub fn describe(imported: &Imported) -> String {
    match imported {
        Imported::Urls { format, urls, dropped: 0 } => format!("imported {} URLs from {format}", urls.len()),
        Imported::Urls { format, urls, dropped } => {
            format!("imported {} URLs from {format} ({dropped} invalid or repeated)", urls.len())
        },
        Imported::Session(file) => format!("imported session with {} lines", file.input.lines.len()),
    }
}

/// One URL (or session line) per line.
pub fn list(imported: &Imported) -> String {
    let lines = match imported {
        Imported::Urls { urls, .. } => urls,
        Imported::Session(file) => &file.input.lines,
    };
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Merge into existing batch text. A saved session stays a saved session;
/// plain text stays plain text.
pub fn merge_into(
    config: &Config,
    existing: &str,
    imported: &Imported,
    mode: MergeMode,
    now: OffsetDateTime,
) -> Result<String> {
    let mut session = BatchArgs::default().session_from_text(config, existing);
    session.apply_import(imported, mode);
    match saved_session(existing).is_some() {
        true => session.to_batch_file(now).and_then(|file| file.to_json()).or_raise(|| ErrorKind::Session),
        false => Ok(format!("{}\n", session.text)),
    }
}
