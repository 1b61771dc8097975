//! Archive command: the whole batch as one ZIP.

use crate::cli::BatchArgs;
use crate::cli::io::write_output;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use linkfile_archive::{Archive, ArchiveBuilder, QrHandle};
use linkfile_batch::Session;
use linkfile_config::Config;
use std::path::{Path, PathBuf};

pub async fn build_archive(session: &Session, config: &Config, qr: Option<QrHandle>) -> Result<Archive> {
    let plan = session.plan();
    plan.require_valid().or_raise(|| ErrorKind::Batch)?;
    let mut builder = ArchiveBuilder::from_plan(&plan).qr_render(config.qr.clone());
    if let Some(qr) = qr {
        builder = builder.qr(qr);
    }
    builder.build().await.or_raise(|| ErrorKind::Archive)
}

/// Writes to `output`, or to the archive's own name in the current directory.
pub async fn run_archive(
    config: &Config,
    batch: &BatchArgs,
    output: Option<&Path>,
    qr: Option<QrHandle>,
) -> Result<()> {
    let session = batch.session(config)?;
    let archive = build_archive(&session, config, qr).await?;
    let path = output.map_or_else(|| PathBuf::from(&archive.name), Path::to_path_buf);
    write_output(Some(&path), &archive.bytes)?;
    println!("{} ({} link files)", path.display(), archive.file_count);
    Ok(())
}
