use crate::consts::{DEFAULT_FALLBACK, GENERIC_HOSTS};
use url::Url;

/// Human-friendly base name for a link file pointing at `url`.
///
/// Uses the host without `www.` and without its top-level label. When that
/// leaves nothing, or only a generic host like `github`, the first path
/// segment is appended. Falls back to `link`.
///
/// ```
/// use linkfile_naming::safe_base_name_from_url;
///
/// assert_eq!(safe_base_name_from_url("https://www.rust-lang.org/learn"), "rust-lang");
/// assert_eq!(safe_base_name_from_url("https://github.com/rust-lang/rust"), "github-rust-lang");
/// assert_eq!(safe_base_name_from_url("not a url"), "link");
/// ```
pub fn safe_base_name_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return DEFAULT_FALLBACK.to_string();
    };
    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').filter(|label| !label.is_empty()).collect();
    let mut base = match labels.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., _tld] => rest.join("."),
    };

    if (base.is_empty() || GENERIC_HOSTS.contains(&base.as_str()))
        && let Some(segment) = parsed.path_segments().and_then(|mut s| s.map(str::trim).find(|s| !s.is_empty()))
    {
        let prefix = if base.is_empty() { DEFAULT_FALLBACK } else { base.as_str() };
        base = format!("{prefix}-{segment}");
    }
    match base.is_empty() {
        true => DEFAULT_FALLBACK.to_string(),
        false => base,
    }
}
