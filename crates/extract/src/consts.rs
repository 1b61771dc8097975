use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Content signatures, checked when nothing was declared.
regex!(SHORTCUT_SIGNATURE_REGEX, r"(?im)^\s*\[InternetShortcut\]");
regex!(PLIST_SIGNATURE_REGEX, r"<plist[\s>]");
regex!(HTML_SIGNATURE_REGEX, r"(?i)<html[\s>]|<!doctype\s+html|NETSCAPE-Bookmark-file");

// Shortcut files.
regex!(SHORTCUT_URL_REGEX, r"(?im)^[ \t]*URL[ \t]*=[ \t]*(.+)$");
regex!(PLIST_URL_KEY_REGEX, r"(?i)<key>\s*URL\s*</key>\s*<string>\s*([^<]+?)\s*</string>");
regex!(PLIST_ANY_URL_REGEX, r"(?i)<string>\s*(https?://[^<]+?)\s*</string>");

// Markup.
selector!(ANCHOR_SELECTOR, "a[href]");
selector!(META_CONTENT_SELECTOR, "meta[content]");
regex!(REFRESH_TARGET_REGEX, r#"(?i)^\s*[\d.]*\s*[;,]?\s*url\s*=\s*['"]?([^'"]+)"#);
regex!(LOCATION_CALL_REGEX, r#"(?i)window\.location\.(?:replace|assign)\(\s*["']([^"']+)["']\s*\)"#);
regex!(LOCATION_HREF_REGEX, r#"(?i)window\.location\.href\s*=\s*["']([^"']+)["']"#);
regex!(BOOKMARKS_SIGNATURE_REGEX, r"(?i)NETSCAPE-Bookmark-file|<DL[^>]*>|<H3[^>]*>");
regex!(BARE_URL_REGEX, r#"(?i)\bhttps?://[^\s"'<>]+"#);

// URL-likeness of a single cell or value.
regex!(URL_SCHEME_REGEX, r"(?i)^https?://");
regex!(URL_WWW_REGEX, r"(?i)^www\.");
regex!(URL_DOMAIN_REGEX, r"(?i)[a-z0-9-]+\.[a-z]{2,}");
