//! HTML: redirect pages, bookmark exports and anything with a link in it.

use super::{Detected, found};
use crate::consts::{
    ANCHOR_SELECTOR, BARE_URL_REGEX, BOOKMARKS_SIGNATURE_REGEX, LOCATION_CALL_REGEX, LOCATION_HREF_REGEX,
    META_CONTENT_SELECTOR, REFRESH_TARGET_REGEX,
};
use scraper::{ElementRef, Html};

/// Redirect target first, then bookmark anchors, then the first anchor, then
/// the first bare URL anywhere in the text.
pub(crate) fn detect(text: &str) -> Option<Detected> {
    let document = Html::parse_document(text);
    if let Some(target) = redirect_target(&document, text) {
        return found(vec![target]);
    }
    let mut anchors = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string);
    if BOOKMARKS_SIGNATURE_REGEX.is_match(text) {
        let all: Vec<String> = anchors.collect();
        tracing::debug!(count = all.len(), "Bookmark export");
        return found(all);
    }
    if let Some(first) = anchors.next() {
        return found(vec![first]);
    }
    BARE_URL_REGEX.find(text).and_then(|m| found(vec![m.as_str().to_string()]))
}

fn redirect_target(document: &Html, text: &str) -> Option<String> {
    let metas: Vec<_> = document.select(&META_CONTENT_SELECTOR).collect();
    metas
        .iter()
        .filter(|meta| is_refresh(meta))
        .chain(metas.iter().filter(|meta| !is_refresh(meta)))
        .filter_map(|meta| meta.value().attr("content"))
        .find_map(|content| REFRESH_TARGET_REGEX.captures(content))
        .map(|caps| caps[1].trim().to_string())
        .filter(|target| !target.is_empty())
        .or_else(|| {
            [&LOCATION_CALL_REGEX, &LOCATION_HREF_REGEX]
                .into_iter()
                .find_map(|regex| regex.captures(text))
                .map(|caps| caps[1].trim().to_string())
        })
}

fn is_refresh(meta: &ElementRef) -> bool {
    meta.value().attr("http-equiv").is_some_and(|v| v.eq_ignore_ascii_case("refresh"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn urls(text: &str) -> Vec<String> {
        match detect(text) {
            Some(Detected::Urls(urls)) => urls,
            other => panic!("expected URLs, got {other:?}"),
        }
    }

    #[test]
    fn test_generated_redirect_page() {
        let rendered = linkfile_render::render("https://example.com/a?b=1&c=2", linkfile_render::OutputType::Html);
        assert_eq!(urls(&rendered.contents), ["https://example.com/a?b=1&c=2"]);
    }

    #[rstest]
    #[case(
        r#"<meta content="0; url='https://a.com/x'" http-equiv="Refresh"><a href="https://b.com">b</a>"#,
        "https://a.com/x"
    )]
    #[case(
        concat!(
            r#"<meta name="viewport" content="width=device-width">"#,
            r#"<meta http-equiv="refresh" content="5;URL=https://c.com">"#,
        ),
        "https://c.com"
    )]
    #[case(
        r#"<script>window.location.replace("https://d.com/next");</script><a href="/x">x</a>"#,
        "https://d.com/next"
    )]
    #[case(r#"<script>window.location.href = 'https://e.com';</script>"#, "https://e.com")]
    fn test_redirects(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(urls(text), [expected]);
    }

    #[test]
    fn test_bookmark_export_collects_every_anchor() {
        let text = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<TITLE>Bookmarks</TITLE>
<DL><p>
    <DT><H3>Folder</H3>
    <DL><p>
        <DT><A HREF="https://one.example" ADD_DATE="1">One</A>
        <DT><A HREF="https://two.example">Two</A>
    </DL><p>
    <DT><A HREF=" https://three.example ">Three</A>
</DL><p>"#;
        assert_eq!(urls(text), ["https://one.example", "https://two.example", "https://three.example"]);
    }

    #[test]
    fn test_plain_page_takes_first_anchor() {
        let text = concat!(
            r#"<html><body><a href="">empty</a>"#,
            r#"<a href="https://first.com">1</a><a href="https://second.com">2</a></body></html>"#,
        );
        assert_eq!(urls(text), ["https://first.com"]);
    }

    #[test]
    fn test_bare_url_fallback() {
        let text = "<html><body><p>See https://bare.example/path?q=1 for details.</p></body></html>";
        assert_eq!(urls(text), ["https://bare.example/path?q=1"]);
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(detect("<html><body><p>No links.</p></body></html>"), None);
    }
}
