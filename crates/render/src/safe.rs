use url::Url;

/// Strict re-check applied right before a URL is written into an artifact.
///
/// Returns the serialized URL only if it is non-empty, free of control
/// characters, parses as an absolute URL and uses `http` or `https`.
pub fn to_safe_http_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.chars().any(char::is_control) {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let out = url.to_string();
    match out.chars().any(char::is_control) {
        true => None,
        false => Some(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com", Some("https://example.com/"))]
    #[case("  http://example.com/a?b=c  ", Some("http://example.com/a?b=c"))]
    #[case("https://example.com/\"><script>", Some("https://example.com/%22%3E%3Cscript%3E"))]
    #[case("javascript:alert(1)", None)]
    #[case("data:text/html,hi", None)]
    #[case("file:///etc/passwd", None)]
    #[case("https://example.com/\nevil", None)]
    #[case("example.com", None)]
    #[case("", None)]
    fn test_to_safe_http_url(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(to_safe_http_url(raw).as_deref(), expected);
    }
}
