use super::{Detected, found};
use crate::consts::{PLIST_ANY_URL_REGEX, PLIST_URL_KEY_REGEX, SHORTCUT_URL_REGEX};

/// Windows Internet Shortcut: the first `URL=` line.
pub(crate) fn internet_shortcut(text: &str) -> Option<Detected> {
    let url = SHORTCUT_URL_REGEX.captures(text).map(|caps| caps[1].trim().to_string());
    found(url.into_iter().filter(|url| !url.is_empty()).collect())
}

/// Property list: the string after a `URL` key, else the first http(s) string.
pub(crate) fn webloc(text: &str) -> Option<Detected> {
    let url = PLIST_URL_KEY_REGEX
        .captures(text)
        .or_else(|| PLIST_ANY_URL_REGEX.captures(text))
        .map(|caps| unescape_xml(caps[1].trim()));
    found(url.into_iter().filter(|url| !url.is_empty()).collect())
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn urls(detected: Option<Detected>) -> Vec<String> {
        match detected {
            Some(Detected::Urls(urls)) => urls,
            _ => vec![],
        }
    }

    #[rstest]
    #[case("[InternetShortcut]\r\nURL=https://example.com/\r\n", "https://example.com/")]
    #[case(
        "[{000214A0-0000-0000-C000-000000000046}]\nProp3=19,11\n[InternetShortcut]\n\
         IDList=\nurl = https://a.com/x  \nIconIndex=0\n",
        "https://a.com/x"
    )]
    fn test_internet_shortcut(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(urls(internet_shortcut(text)), [expected]);
    }

    #[rstest]
    #[case("[InternetShortcut]\nURL=\n")]
    #[case("[InternetShortcut]\nURL=\nIconIndex=0\n")]
    #[case("[InternetShortcut]\nIconIndex=0\n")]
    #[case("")]
    fn test_internet_shortcut_without_url(#[case] text: &str) {
        assert_eq!(internet_shortcut(text), None);
    }

    #[test]
    fn test_webloc() {
        let plist = "<?xml version=\"1.0\"?>\n<plist version=\"1.0\">\n<dict>\n\t<key>URL</key>\n\
                     \t<string>https://example.com/?a=1&amp;b=2</string>\n</dict>\n</plist>\n";
        assert_eq!(urls(webloc(plist)), ["https://example.com/?a=1&b=2"]);
    }

    #[test]
    fn test_webloc_falls_back_to_first_http_string() {
        let plist = "<plist><dict><key>Title</key><string>Home</string>\
                     <key>Link</key><string> http://example.org/ </string></dict></plist>";
        assert_eq!(urls(webloc(plist)), ["http://example.org/"]);
    }

    #[test]
    fn test_webloc_without_url() {
        assert_eq!(webloc("<plist><dict><key>Title</key><string>Home</string></dict></plist>"), None);
    }
}
