use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which kind of shortcut file to generate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Self-contained HTML page that redirects on open. Works everywhere.
    #[default]
    Html,
    /// Windows Internet Shortcut (`[InternetShortcut]`).
    Url,
    /// macOS property-list bookmark.
    Webloc,
}

impl OutputType {
    pub const ALL: [OutputType; 3] = [OutputType::Html, OutputType::Url, OutputType::Webloc];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Html => "html",
            OutputType::Url => "url",
            OutputType::Webloc => "webloc",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            OutputType::Html => "text/html;charset=utf-8",
            OutputType::Url => "text/plain;charset=utf-8",
            OutputType::Webloc => "application/xml;charset=utf-8",
        }
    }

    /// Detect output type from a file extension.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref().extension().and_then(|ext| ext.to_str()).and_then(|ext| match ext.to_lowercase().as_str() {
            "html" | "htm" => Some(OutputType::Html),
            "url" => Some(OutputType::Url),
            "webloc" => Some(OutputType::Webloc),
            _ => None,
        })
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "html" | "htm" => Ok(OutputType::Html),
            "url" => Ok(OutputType::Url),
            "webloc" => Ok(OutputType::Webloc),
            _ => exn::bail!(ErrorKind::UnsupportedOutput(s.to_string())),
        }
    }
}
