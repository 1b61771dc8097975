use crate::safe::to_safe_http_url;

/// Windows Internet Shortcut for `url`. The `URL=` field is left empty if
/// `url` fails the safety check.
///
/// Safe URLs are fully percent-encoded, so they can never break out of the
/// line they are written to.
pub fn internet_shortcut(url: &str) -> (String, bool) {
    let safe = to_safe_http_url(url);
    let ok = safe.is_some();
    (format!("[InternetShortcut]\nURL={}\n", safe.unwrap_or_default()), ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internet_shortcut() {
        assert_eq!(
            internet_shortcut("https://example.com"),
            ("[InternetShortcut]\nURL=https://example.com/\n".to_string(), true)
        );
    }

    #[test]
    fn test_unsafe_leaves_field_empty() {
        assert_eq!(internet_shortcut("vbscript:msgbox"), ("[InternetShortcut]\nURL=\n".to_string(), false));
    }
}
