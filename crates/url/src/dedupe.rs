use crate::consts::REPEATED_SLASH_REGEX;
use crate::error::UnknownMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Strictness tier for [`dedupe_key`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupeMode {
    /// Canonical string, host lowercased.
    #[default]
    Exact,
    /// Also ignores `www.`, default ports, one trailing slash and `http` vs `https`.
    Loose,
    /// Also collapses repeated path slashes and ignores query parameter order.
    Aggressive,
}

impl DedupeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DedupeMode::Exact => "exact",
            DedupeMode::Loose => "loose",
            DedupeMode::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for DedupeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DedupeMode {
    type Err = UnknownMode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(DedupeMode::Exact),
            "loose" => Ok(DedupeMode::Loose),
            "aggressive" => Ok(DedupeMode::Aggressive),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Comparison key for duplicate detection.
///
/// Two URLs are duplicates under `mode` when their keys are equal. Input that
/// does not parse as an absolute URL is its own key.
///
/// ```
/// use linkfile_url::{DedupeMode, dedupe_key};
///
/// let a = dedupe_key("https://www.example.com/docs/", DedupeMode::Loose);
/// let b = dedupe_key("http://example.com/docs", DedupeMode::Loose);
/// assert_eq!(a, b);
/// let (ba, ab) = ("https://example.com/?b=2&a=1", "https://example.com/?a=1&b=2");
/// assert_ne!(dedupe_key(ba, DedupeMode::Loose), dedupe_key(ab, DedupeMode::Loose));
/// assert_eq!(dedupe_key(ba, DedupeMode::Aggressive), dedupe_key(ab, DedupeMode::Aggressive));
/// ```
pub fn dedupe_key(url: &str, mode: DedupeMode) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if mode == DedupeMode::Exact {
        return parsed.to_string();
    }

    if let Some(host) = parsed.host_str().and_then(|h| h.strip_prefix("www.")).map(str::to_string)
        && parsed.set_host(Some(&host)).is_err()
    {
        return url.to_string();
    }
    // Switching to https also elides an explicit :443.
    if parsed.scheme() == "http" && parsed.set_scheme("https").is_err() {
        return url.to_string();
    }
    let path = parsed.path().to_string();
    if path != "/"
        && let Some(trimmed) = path.strip_suffix('/')
    {
        parsed.set_path(trimmed);
    }

    if mode == DedupeMode::Aggressive {
        let collapsed = REPEATED_SLASH_REGEX.replace_all(parsed.path(), "/").into_owned();
        parsed.set_path(&collapsed);
        let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        if !pairs.is_empty() {
            pairs.sort();
            parsed.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }
    parsed.to_string()
}
