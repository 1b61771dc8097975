use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(SCHEME_PREFIX_REGEX, r"^[a-zA-Z][a-zA-Z0-9+.-]*:");
regex!(LEADING_WRAP_REGEX, r#"^[<"'`]+"#);
regex!(TRAILING_WRAP_REGEX, r#"[>"'`]+$"#);
regex!(IPV4_REGEX, r"^\d{1,3}(?:\.\d{1,3}){3}$");
regex!(IPV6_REGEX, r"^[0-9a-f:.]+$");
regex!(LABEL_REGEX, r"^[a-z0-9-]+$");
regex!(TLD_REGEX, r"^[a-z]{2,}$");
regex!(REPEATED_SLASH_REGEX, r"/{2,}");

/// Query keys dropped by [`PrivacyMode::StripTracking`](crate::PrivacyMode::StripTracking),
/// in addition to anything prefixed `utm_`.
pub(crate) const TRACKING_KEYS: [&str; 7] = ["fbclid", "gclid", "dclid", "msclkid", "igshid", "mc_cid", "mc_eid"];
pub(crate) const TRACKING_PREFIX: &str = "utm_";
