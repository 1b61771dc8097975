//! One module per shortcut format. Each escapes for its own syntax.

mod page;
mod shortcut;
mod webloc;

pub use self::page::redirect_page;
pub use self::shortcut::internet_shortcut;
pub use self::webloc::webloc;

/// Escape text for HTML element content and double- or single-quoted attributes.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for XML character data.
pub(crate) fn escape_xml(s: &str) -> String {
    escape_html(s).replace("&#39;", "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b'c"), "a&amp;b&apos;c");
    }
}
