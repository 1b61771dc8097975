use crate::consts::{TRACKING_KEYS, TRACKING_PREFIX};
use crate::error::UnknownMode;
use crate::normalize::NormalizedUrl;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much of a URL survives into generated files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivacyMode {
    /// Keep the URL exactly as canonicalized.
    #[default]
    Full,
    /// Drop `utm_*` and well-known click-id parameters, keep everything else.
    StripTracking,
    /// Drop the whole query string and fragment.
    StripAll,
}

impl PrivacyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyMode::Full => "full",
            PrivacyMode::StripTracking => "stripTracking",
            PrivacyMode::StripAll => "stripAll",
        }
    }

    /// Apply this mode to an already-canonical URL.
    ///
    /// Scheme, host and path are never touched, so the result is still a
    /// valid [`NormalizedUrl`].
    #[must_use]
    pub fn apply(self, url: &NormalizedUrl) -> NormalizedUrl {
        match self {
            PrivacyMode::Full => url.clone(),
            PrivacyMode::StripTracking => strip_tracking(url),
            PrivacyMode::StripAll => {
                let mut stripped = url.as_url().clone();
                stripped.set_query(None);
                stripped.set_fragment(None);
                NormalizedUrl::from_canonical(stripped)
            },
        }
    }
}

impl fmt::Display for PrivacyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyMode {
    type Err = UnknownMode;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "full" => Ok(PrivacyMode::Full),
            "striptracking" => Ok(PrivacyMode::StripTracking),
            "stripall" => Ok(PrivacyMode::StripAll),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

fn is_tracking_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.starts_with(TRACKING_PREFIX) || TRACKING_KEYS.contains(&key.as_str())
}

fn strip_tracking(url: &NormalizedUrl) -> NormalizedUrl {
    let pairs: Vec<(String, String)> = url.as_url().query_pairs().into_owned().collect();
    let kept: Vec<&(String, String)> = pairs.iter().filter(|(key, _)| !is_tracking_key(key)).collect();
    if kept.len() == pairs.len() {
        return url.clone();
    }
    let mut stripped = url.as_url().clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    NormalizedUrl::from_canonical(stripped)
}
