//! Session command: save the batch with its settings for a later run.

use crate::cli::io::write_output;
use crate::cli::{BatchArgs, OutputArgs};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use linkfile_batch::Session;
use linkfile_config::Config;
use time::OffsetDateTime;

pub fn run_session(config: &Config, batch: &BatchArgs, output: &OutputArgs) -> Result<()> {
    let session = batch.session(config)?;
    let json = session_json(&session, OffsetDateTime::now_utc())?;
    write_output(output.output.as_deref(), json.as_bytes())
}

pub fn session_json(session: &Session, created_at: OffsetDateTime) -> Result<String> {
    session.to_batch_file(created_at).and_then(|file| file.to_json()).or_raise(|| ErrorKind::Session)
}
