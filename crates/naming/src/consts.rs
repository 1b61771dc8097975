use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(PATH_SEPARATOR_REGEX, r"[/\\]");
regex!(FORBIDDEN_CHAR_REGEX, r#"[<>:"|?*]"#);
regex!(CONTROL_CHAR_REGEX, r"[\x00-\x1F\x7F]");
regex!(WHITESPACE_RUN_REGEX, r"\s+");
regex!(DOT_RUN_REGEX, r"\.{2,}");
regex!(HYPHEN_RUN_REGEX, r"-{2,}");
regex!(TRAILING_DOT_SPACE_REGEX, r"[. ]+$");
regex!(UNSAFE_BASE_CHAR_REGEX, r"(?i)[^a-z0-9._-]");
regex!(UNDERSCORE_RUN_REGEX, r"_+");
regex!(KNOWN_EXTENSION_REGEX, r"(?i)\.(?:zip|csv|json|html|url|webloc)$");

/// Device names Windows refuses as a file's base name, whatever the extension.
pub(crate) const RESERVED_NAMES: [&str; 22] = [
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8", "com9", "lpt1", "lpt2",
    "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Hosts too generic to name a file on their own; the first path segment is
/// appended for these.
pub(crate) const GENERIC_HOSTS: [&str; 3] = ["google", "github", "microsoft"];

pub(crate) const DEFAULT_FALLBACK: &str = "link";
pub(crate) const DEFAULT_MAX_LENGTH: usize = 160;
/// Longest extension (including its dot) kept intact when truncating.
pub(crate) const MAX_KEPT_EXTENSION: usize = 10;
pub(crate) const MAX_BASE_LENGTH: usize = 200;
pub(crate) const DEFAULT_ARCHIVE_BASE: &str = "links";
