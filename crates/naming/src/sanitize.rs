use crate::consts::{
    CONTROL_CHAR_REGEX, DEFAULT_ARCHIVE_BASE, DEFAULT_FALLBACK, DEFAULT_MAX_LENGTH, DOT_RUN_REGEX, FORBIDDEN_CHAR_REGEX,
    HYPHEN_RUN_REGEX, KNOWN_EXTENSION_REGEX, MAX_BASE_LENGTH, MAX_KEPT_EXTENSION, PATH_SEPARATOR_REGEX, RESERVED_NAMES,
    TRAILING_DOT_SPACE_REGEX, UNDERSCORE_RUN_REGEX, UNSAFE_BASE_CHAR_REGEX, WHITESPACE_RUN_REGEX,
};
use unicode_normalization::UnicodeNormalization;

/// Tuning for [`sanitize_filename`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeOptions<'a> {
    /// Returned whenever sanitizing leaves nothing behind.
    pub fallback: &'a str,
    /// Maximum length in characters.
    pub max_length: usize,
}

impl Default for SanitizeOptions<'_> {
    fn default() -> Self {
        Self { fallback: DEFAULT_FALLBACK, max_length: DEFAULT_MAX_LENGTH }
    }
}

/// Make `name` safe to use as a single file name on Windows, macOS and Linux.
///
/// The name is NFKC-normalized, separators and characters Windows forbids
/// become `-`, control characters are dropped, runs of whitespace, dots and
/// hyphens are collapsed, and trailing dots or spaces are removed. Reserved
/// device names get an `_` prefix. Over-long names are cut to
/// `options.max_length` characters, keeping a short extension intact.
///
/// ```
/// use linkfile_naming::{SanitizeOptions, sanitize_filename};
///
/// let options = SanitizeOptions::default();
/// assert_eq!(sanitize_filename("a/b:c?.html", &options), "a-b-c-.html");
/// assert_eq!(sanitize_filename("CON.url", &options), "_CON.url");
/// assert_eq!(sanitize_filename("  ...  ", &options), "link");
/// ```
pub fn sanitize_filename(name: &str, options: &SanitizeOptions<'_>) -> String {
    let normalized: String = name.trim().nfkc().collect();
    let cleaned = PATH_SEPARATOR_REGEX.replace_all(&normalized, "-");
    let cleaned = FORBIDDEN_CHAR_REGEX.replace_all(&cleaned, "-");
    let cleaned = CONTROL_CHAR_REGEX.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_RUN_REGEX.replace_all(&cleaned, " ");
    let cleaned = DOT_RUN_REGEX.replace_all(cleaned.trim(), ".");
    let cleaned = HYPHEN_RUN_REGEX.replace_all(&cleaned, "-");
    let cleaned = TRAILING_DOT_SPACE_REGEX.replace(cleaned.trim(), "");

    let mut out = match cleaned.is_empty() {
        true => options.fallback.to_string(),
        false => cleaned.into_owned(),
    };
    let stem = out.rfind('.').map_or(out.as_str(), |dot| &out[..dot]);
    if RESERVED_NAMES.contains(&stem.to_lowercase().as_str()) {
        out.insert(0, '_');
    }

    let out = truncate(out, options.max_length.max(1));
    match out.is_empty() {
        true => options.fallback.to_string(),
        false => out,
    }
}

fn truncate(name: String, max_length: usize) -> String {
    if name.chars().count() <= max_length {
        return name;
    }
    if let Some(dot) = name.rfind('.')
        && dot > 0
    {
        let (stem, ext) = name.split_at(dot);
        let ext_length = ext.chars().count();
        if ext_length <= MAX_KEPT_EXTENSION {
            let keep = max_length.saturating_sub(ext_length).max(1);
            let stem: String = stem.chars().take(keep).collect();
            return format!("{}{ext}", TRAILING_DOT_SPACE_REGEX.replace(&stem, ""));
        }
    }
    let cut: String = name.chars().take(max_length).collect();
    TRAILING_DOT_SPACE_REGEX.replace(&cut, "").into_owned()
}

/// Append `.ext` unless `name` already ends with it (case-insensitively).
///
/// A leading dot on `ext` is ignored. Blank names or extensions leave the
/// trimmed name as-is.
pub fn ensure_extension(name: &str, ext: &str) -> String {
    let name = name.trim();
    let ext = ext.trim();
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if name.is_empty() || ext.is_empty() {
        return name.to_string();
    }
    match name.to_lowercase().ends_with(&format!(".{}", ext.to_lowercase())) {
        true => name.to_string(),
        false => format!("{name}.{ext}"),
    }
}

/// [`ensure_extension`], then [`sanitize_filename`] with default options,
/// then [`ensure_extension`] again in case truncation ate the extension.
pub fn ensure_safe_filename(name: &str, ext: &str) -> String {
    let with_ext = ensure_extension(name, ext);
    ensure_extension(&sanitize_filename(&with_ext, &SanitizeOptions::default()), ext)
}

fn strict_base(raw: &str) -> String {
    let cleaned = UNSAFE_BASE_CHAR_REGEX.replace_all(raw.trim(), "_");
    let cleaned = UNDERSCORE_RUN_REGEX.replace_all(&cleaned, "_");
    let cleaned = TRAILING_DOT_SPACE_REGEX.replace(&cleaned, "");
    // ASCII only at this point, so the byte boundary is a char boundary.
    let cut = &cleaned[..cleaned.floor_char_boundary(MAX_BASE_LENGTH)];
    TRAILING_DOT_SPACE_REGEX.replace(cut, "").into_owned()
}

/// Reduce `raw` to a plain ASCII base name (`[A-Za-z0-9._-]`, at most 200
/// characters). Anything else becomes `_`; an empty result becomes `link`.
pub fn sanitize_base_name(raw: &str) -> String {
    let base = strict_base(raw);
    match base.is_empty() {
        true => DEFAULT_FALLBACK.to_string(),
        false => base,
    }
}

/// Clean a base name typed by a user, dropping a trailing output extension
/// (`.zip`, `.csv`, `.json`, `.html`, `.url`, `.webloc`) they may have added.
///
/// Returns `None` if nothing usable remains, so the caller can fall back to a
/// derived name.
pub fn clean_user_base_name(raw: &str) -> Option<String> {
    let without_ext = KNOWN_EXTENSION_REGEX.replace(raw.trim(), "");
    Some(strict_base(&without_ext)).filter(|base| !base.is_empty())
}

/// File name for an archive built from the user's base name (`links` when blank).
pub fn archive_name(base: &str) -> String {
    let base = match base.trim() {
        "" => DEFAULT_ARCHIVE_BASE,
        trimmed => trimmed,
    };
    ensure_safe_filename(base, "zip")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("example", "example")]
    #[case("  spaced   out  name ", "spaced out name")]
    #[case("a/b\\c", "a-b-c")]
    #[case("what?<is>\"this\"|*", "what-is-this-")]
    #[case("tab\there", "tabhere")]
    #[case("many....dots", "many.dots")]
    #[case("dash---dash", "dash-dash")]
    #[case("trailing. . .", "trailing")]
    #[case("ｆｕｌｌｗｉｄｔｈ", "fullwidth")]
    #[case("", "link")]
    #[case("///", "-")]
    #[case("nul", "_nul")]
    #[case("Com1.html", "_Com1.html")]
    #[case("lpt9.tar", "_lpt9.tar")]
    #[case("console.html", "console.html")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(input, &SanitizeOptions::default()), expected);
    }

    #[test]
    fn test_sanitize_custom_fallback() {
        let options = SanitizeOptions { fallback: "untitled", max_length: 160 };
        assert_eq!(sanitize_filename(" ? ", &options), "-");
        assert_eq!(sanitize_filename(" . ", &options), "untitled");
    }

    #[test]
    fn test_truncate_keeps_short_extension() {
        let name = format!("{}.webloc", "a".repeat(300));
        let out = sanitize_filename(&name, &SanitizeOptions::default());
        assert_eq!(out.chars().count(), 160);
        assert!(out.ends_with(".webloc"));
    }

    #[test]
    fn test_truncate_drops_long_extension() {
        let name = format!("{}.{}", "a".repeat(50), "b".repeat(50));
        let out = sanitize_filename(&name, &SanitizeOptions { fallback: "link", max_length: 20 });
        assert_eq!(out, "a".repeat(20));
    }

    #[test]
    fn test_truncate_counts_characters() {
        let name = format!("{}.html", "é".repeat(200));
        let out = sanitize_filename(&name, &SanitizeOptions::default());
        assert_eq!(out.chars().count(), 160);
        assert!(out.ends_with(".html"));
    }

    #[rstest]
    #[case("example", "html", "example.html")]
    #[case("example.HTML", "html", "example.HTML")]
    #[case("example", ".url", "example.url")]
    #[case("  example.webloc ", "webloc", "example.webloc")]
    #[case("example.html", "url", "example.html.url")]
    #[case("", "html", "")]
    #[case("example", "", "example")]
    fn test_ensure_extension(#[case] name: &str, #[case] ext: &str, #[case] expected: &str) {
        assert_eq!(ensure_extension(name, ext), expected);
    }

    #[rstest]
    #[case("example", "html", "example.html")]
    #[case("con", "url", "_con.url")]
    #[case("", "html", "link.html")]
    #[case("a:b", "webloc", "a-b.webloc")]
    fn test_ensure_safe_filename(#[case] name: &str, #[case] ext: &str, #[case] expected: &str) {
        assert_eq!(ensure_safe_filename(name, ext), expected);
    }

    #[rstest]
    #[case("example-2", "example-2")]
    #[case("héllo wörld!!", "h_llo_w_rld_")]
    #[case("trailing...", "trailing")]
    #[case("", "link")]
    #[case("   ", "link")]
    fn test_sanitize_base_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_base_name(input), expected);
    }

    #[test]
    fn test_sanitize_base_name_length() {
        assert_eq!(sanitize_base_name(&"x".repeat(500)).len(), 200);
    }

    #[rstest]
    #[case("my links.zip", Some("my_links"))]
    #[case("Report.CSV", Some("Report"))]
    #[case("page.html", Some("page"))]
    #[case("page.txt", Some("page.txt"))]
    #[case(".zip", None)]
    #[case("  ", None)]
    fn test_clean_user_base_name(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(clean_user_base_name(input).as_deref(), expected);
    }

    #[rstest]
    #[case("", "links.zip")]
    #[case("bookmarks", "bookmarks.zip")]
    #[case("bookmarks.ZIP", "bookmarks.ZIP")]
    #[case("../escape", ".-escape.zip")]
    fn test_archive_name(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(archive_name(base), expected);
    }
}
