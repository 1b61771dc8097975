//! Command-line front end.

mod args;
mod commands;
mod io;

use crate::error::{ErrorKind, Result};
use clap::{Parser, Subcommand};
use exn::ResultExt;
use linkfile_archive::{QrCodeRenderer, QrHandle};
use linkfile_config::Config;
use std::path::PathBuf;
use std::sync::Arc;

pub use args::{BatchArgs, ExportArgs, ExportFormat, ImportArgs, OutputArgs, SingleArgs};

#[derive(Debug, Parser)]
#[command(name = "linkfile", version)]
#[command(about = "Turn messy URL lists into portable shortcut files", long_about = None)]
pub struct Cli {
    /// Read settings from FILE (TOML, YAML or JSON) on top of the user configuration.
    #[arg(short, long, global = true, value_name = "FILE", env = "LINKFILE_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a batch: valid, invalid and duplicate lines.
    Plan {
        #[command(flatten)]
        batch: BatchArgs,
        /// Print the whole plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Pull URLs out of a CSV, JSON, HTML, shortcut or text file.
    Import(ImportArgs),

    /// Write one shortcut file.
    Single(SingleArgs),

    /// Write the batch as CSV or JSON rows.
    Export(ExportArgs),

    /// Write a ZIP of shortcut files, exports and a manifest.
    Archive {
        #[command(flatten)]
        batch: BatchArgs,
        /// Where to write the archive. Defaults to the archive name in the current directory.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Save the batch and its settings as a session file.
    Session {
        #[command(flatten)]
        batch: BatchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load(self.config.as_deref()).or_raise(|| ErrorKind::Config)?;
        tracing::debug!(?config, "loaded config");

        match self.command {
            Command::Plan { batch, json } => commands::run_plan(&config, &batch, json)?,
            Command::Import(args) => commands::run_import(&config, &args)?,
            Command::Single(args) => commands::run_single(&config, &args)?,
            Command::Export(args) => commands::run_export(&config, &args)?,
            Command::Archive { batch, output } => {
                let qr: QrHandle = Arc::new(QrCodeRenderer);
                commands::run_archive(&config, &batch, output.as_deref(), Some(qr)).await?;
            },
            Command::Session { batch, output } => commands::run_session(&config, &batch, &output)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
