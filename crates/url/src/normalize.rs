use crate::consts::{
    IPV4_REGEX, IPV6_REGEX, LABEL_REGEX, LEADING_WRAP_REGEX, SCHEME_PREFIX_REGEX, TLD_REGEX, TRAILING_WRAP_REGEX,
};
use crate::error::Invalid;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// An absolute `http`/`https` URL that passed [`normalize`].
///
/// Scheme and host are lowercase, default ports are elided and the host is
/// known to be `localhost`, an IP address, or a dotted domain with a
/// letters-only top-level label. Serializes as its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    /// Canonicalize `raw`. Shorthand for [`normalize`].
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, Invalid> {
        normalize(raw)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn into_inner(self) -> Url {
        self.0
    }

    /// Host including any non-default port, e.g. `example.com:8080`.
    pub fn host_with_port(&self) -> String {
        let host = self.0.host_str().unwrap_or_default();
        match self.0.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Wraps an already-canonical [`Url`]; only used by transforms that
    /// cannot change scheme or host.
    pub(crate) fn from_canonical(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for NormalizedUrl {
    type Err = Invalid;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl serde::Serialize for NormalizedUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Turn loosely-typed user input into a [`NormalizedUrl`].
///
/// Surrounding whitespace and wrapping `<>`, quotes or backticks are removed.
/// Input without a scheme-like prefix is treated as `https://`. Only `http`
/// and `https` are accepted, and the host must pass [`is_valid_host`].
///
/// ```
/// use linkfile_url::normalize;
///
/// assert_eq!(normalize(" <Example.COM/path> ").unwrap().as_str(), "https://example.com/path");
/// assert!(normalize("ftp://example.com").is_err());
/// ```
pub fn normalize(raw: impl AsRef<str>) -> Result<NormalizedUrl, Invalid> {
    let trimmed = raw.as_ref().trim();
    let unwrapped = LEADING_WRAP_REGEX.replace(trimmed, "");
    let unwrapped = TRAILING_WRAP_REGEX.replace(&unwrapped, "");
    let candidate = unwrapped.trim();
    if candidate.is_empty() {
        return Err(Invalid::Empty);
    }

    let candidate: Cow<'_, str> = match SCHEME_PREFIX_REGEX.is_match(candidate) {
        true => Cow::Borrowed(candidate),
        false => Cow::Owned(format!("https://{candidate}")),
    };
    let url = Url::parse(&candidate).map_err(|_| Invalid::Malformed)?;
    match url.scheme() {
        "http" | "https" => {},
        other => return Err(Invalid::UnsupportedScheme(other.to_string())),
    }
    // The parser lowercases special-scheme hosts and elides their default ports.
    let host = url.host_str().unwrap_or_default();
    if !is_valid_host(host) {
        return Err(Invalid::InvalidHost(host.to_string()));
    }
    Ok(NormalizedUrl(url))
}

/// Host plausibility check applied after parsing.
///
/// Accepts `localhost`, dotted-quad IPv4, bracketed or bare IPv6-shaped
/// addresses (at least two colons, hex digits, colons and dots only) and
/// dotted domains whose labels are 1-63 chars of `[a-z0-9-]` without a
/// leading or trailing hyphen, ending in a letters-only label of two or more
/// characters. A trailing root dot is rejected.
pub fn is_valid_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    if host == "localhost" {
        return true;
    }
    if host.is_empty() || host.ends_with('.') {
        return false;
    }
    if IPV4_REGEX.is_match(&host) {
        return host.split('.').all(|octet| octet.parse::<u16>().is_ok_and(|n| n <= 255));
    }
    let bare = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(&host);
    if bare.contains(':') {
        return IPV6_REGEX.is_match(bare) && bare.matches(':').count() >= 2;
    }
    if !host.contains('.') {
        return false;
    }
    let labels: Vec<&str> = host.split('.').collect();
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && LABEL_REGEX.is_match(label)
            && !label.starts_with('-')
            && !label.ends_with('-')
    });
    labels_ok && labels.last().is_some_and(|tld| TLD_REGEX.is_match(tld))
}
