use crate::cli::io::read_input;
use crate::error::Result;
use clap::{Args, ValueEnum};
use linkfile_batch::{BatchFile, MergeMode, Session};
use linkfile_config::Config;
use linkfile_render::OutputType;
use linkfile_url::{DedupeMode, PrivacyMode};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

fn parse_output_type(value: &str) -> std::result::Result<OutputType, String> {
    value.parse().map_err(|_| format!("expected html, url or webloc, got {value:?}"))
}

/// Where the batch comes from, and per-run overrides of the configured settings.
#[derive(Debug, Default, Clone, Args)]
pub struct BatchArgs {
    /// Read the batch from FILE instead of stdin. Saved session files are restored.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Shortcut format: html, url or webloc.
    #[arg(short = 't', long = "type", value_name = "TYPE", value_parser = parse_output_type)]
    pub output_type: Option<OutputType>,

    /// full, strip-tracking or strip-all.
    #[arg(long, value_parser = PrivacyMode::from_str)]
    pub privacy: Option<PrivacyMode>,

    /// exact, loose or aggressive.
    #[arg(long, value_name = "MODE", value_parser = DedupeMode::from_str)]
    pub dedupe_mode: Option<DedupeMode>,

    /// Keep duplicate URLs.
    #[arg(long)]
    pub no_dedupe: bool,

    /// Archive base name.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

impl BatchArgs {
    /// Configured defaults, then a restored session file (if the input is
    /// one), then the flags given on this run.
    pub fn session(&self, config: &Config) -> Result<Session> {
        let text = read_input(self.input.as_deref())?;
        Ok(self.session_from_text(config, &text))
    }

    pub fn session_from_text(&self, config: &Config, text: &str) -> Session {
        let mut session = match saved_session(text) {
            Some(file) => {
                tracing::debug!(lines = file.input.lines.len(), "restoring session file");
                let mut session = config.session("");
                session.restore(&file);
                session
            },
            None => config.session(text),
        };
        self.apply(&mut session);
        session
    }

    fn apply(&self, session: &mut Session) {
        if let Some(output_type) = self.output_type {
            session.output_type = output_type;
        }
        if let Some(privacy) = self.privacy {
            session.privacy = privacy;
        }
        if let Some(mode) = self.dedupe_mode {
            session.options.dedupe_mode = mode;
        }
        if self.no_dedupe {
            session.options.dedupe = false;
        }
        if let Some(name) = &self.name {
            session.archive_base_name = name.clone();
        }
    }
}

/// Recognised only when the text is JSON carrying the session kind and version.
pub(crate) fn saved_session(text: &str) -> Option<BatchFile> {
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}')).ok()?;
    BatchFile::from_value(&value)
}

#[derive(Debug, Default, Clone, Args)]
pub struct OutputArgs {
    /// Write to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// File to import. Its extension picks the detector when it is a known one.
    pub file: PathBuf,

    /// Merge the imported URLs into this batch or session file instead of printing them.
    #[arg(long, value_name = "FILE")]
    pub into: Option<PathBuf>,

    /// Keep the existing lines of `--into` and add the imported ones after them.
    #[arg(long, requires = "into")]
    pub append: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ImportArgs {
    pub fn merge_mode(&self) -> MergeMode {
        match self.append {
            true => MergeMode::Append,
            false => MergeMode::Replace,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SingleArgs {
    pub url: String,

    /// File name to use instead of one derived from the URL.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    #[arg(short = 't', long = "type", value_name = "TYPE", value_parser = parse_output_type)]
    pub output_type: Option<OutputType>,

    #[arg(long, value_parser = PrivacyMode::from_str)]
    pub privacy: Option<PrivacyMode>,

    /// Directory to write the file into.
    #[arg(short, long, value_name = "DIR", default_value = ".", conflicts_with = "stdout")]
    pub dir: PathBuf,

    /// Print the file contents instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Comma-separated field keys, in column order. Replaces the configured fields.
    #[arg(long, value_name = "KEYS", value_delimiter = ',')]
    pub fields: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}
