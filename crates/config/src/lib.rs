//! Layered configuration.
//!
//! Values are merged from lowest to highest priority:
//!
//! 1. built-in defaults,
//! 2. `config.toml` in the platform configuration directory,
//! 3. an explicitly named file (TOML, YAML or JSON, chosen by extension),
//! 4. `LINKFILE_*` environment variables, with `__` separating nested keys
//!    (`LINKFILE_QR__SCALE=large`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use linkfile_archive::QrRender;
use linkfile_batch::{BatchOptions, Session};
use linkfile_export::FieldKey;
use linkfile_render::OutputType;
use linkfile_url::{DedupeMode, PrivacyMode};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::instrument;

pub const ENV_PREFIX: &str = "LINKFILE_";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "from_str")]
    pub output: OutputType,
    #[serde(deserialize_with = "from_str")]
    pub privacy: PrivacyMode,
    /// Base name of the archive, before sanitizing.
    pub archive_name: String,
    pub dedupe: bool,
    #[serde(deserialize_with = "from_str")]
    pub dedupe_mode: DedupeMode,
    pub export_csv: bool,
    pub export_json: bool,
    pub export_fields: Vec<String>,
    pub qr_png: bool,
    pub qr_svg: bool,
    pub qr: QrRender,
}

impl Default for Config {
    fn default() -> Self {
        let session = Session::default();
        Self::from_session(&session, QrRender::default())
    }
}

// Enum settings accept the same loose spellings as the command line
// ("strip-tracking", ".webloc"), not only their serialized names.
fn from_str<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(de::Error::custom)
}

/// `config.toml` inside the platform configuration directory, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "linkfile").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl Config {
    fn from_session(session: &Session, qr: QrRender) -> Self {
        let options = &session.options;
        Self {
            output: session.output_type,
            privacy: session.privacy,
            archive_name: session.archive_base_name.clone(),
            dedupe: options.dedupe,
            dedupe_mode: options.dedupe_mode,
            export_csv: options.export_csv,
            export_json: options.export_json,
            export_fields: options.export_fields.clone(),
            qr_png: options.qr_png,
            qr_svg: options.qr_svg,
            qr,
        }
    }

    /// Every provider, merged in priority order, without extracting.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = user_config_path() {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate. A named file that does not exist is an error; a
    /// missing user configuration file is not.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let config: Self = Self::figment(explicit).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(output = %config.output, privacy = %config.privacy, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive_name.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("archive_name must not be blank".to_string()));
        }
        if !self.qr.is_in_range() {
            exn::bail!(ErrorKind::Invalid(format!(
                "qr margin {} or scale {} is out of range",
                self.qr.margin, self.qr.scale
            )));
        }
        if let Some(unknown) = self.export_fields.iter().find(|key| key.parse::<FieldKey>().is_err()) {
            exn::bail!(ErrorKind::Invalid(format!("unknown export field {unknown:?}")));
        }
        Ok(())
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            dedupe: self.dedupe,
            dedupe_mode: self.dedupe_mode,
            export_csv: self.export_csv,
            export_json: self.export_json,
            export_fields: self.export_fields.clone(),
            qr_png: self.qr_png,
            qr_svg: self.qr_svg,
        }
    }

    /// A fresh session holding `text`, seeded from this configuration.
    pub fn session(&self, text: impl Into<String>) -> Session {
        Session {
            text: text.into(),
            output_type: self.output,
            archive_base_name: self.archive_name.clone(),
            options: self.batch_options(),
            privacy: self.privacy,
        }
    }
}
