use super::escape_html;
use crate::assets::Builtins;
use crate::safe::to_safe_http_url;

const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src data:; \
                                       base-uri 'none'; form-action 'none'; frame-ancestors 'none'";
const STYLESHEET: &str = "redirect.css";

/// Redirect page for `url`, or a placeholder page if it fails the safety check.
///
/// Returns the document and whether `url` was safe.
pub fn redirect_page(url: &str) -> (String, bool) {
    match to_safe_http_url(url) {
        Some(safe) => (document("Redirecting…", Some(&safe), &redirect_body(&safe)), true),
        None => (document("Invalid link", None, PLACEHOLDER_BODY), false),
    }
}

const PLACEHOLDER_BODY: &str =
    "<h1>Invalid link</h1>\n<p>This file does not contain a valid http:// or https:// address.</p>";

fn redirect_body(safe: &str) -> String {
    let escaped = escape_html(safe);
    format!(
        "<p>Redirecting to <a href=\"{escaped}\" rel=\"noopener noreferrer\">{escaped}</a></p>\n\
         <p class=\"muted\">If nothing happens, follow the link above.</p>"
    )
}

fn document(title: &str, refresh_to: Option<&str>, body: &str) -> String {
    let style = Builtins::load_str(STYLESHEET)
        .inspect_err(|err| tracing::warn!(error = %err, "Redirect page stylesheet missing"))
        .unwrap_or_default();
    let refresh = refresh_to
        .map(|url| format!("<meta http-equiv=\"refresh\" content=\"0; url={}\">\n", escape_html(url)))
        .unwrap_or_default();
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"Content-Security-Policy\" content=\"{CONTENT_SECURITY_POLICY}\">\n\
         <meta name=\"referrer\" content=\"no-referrer\">\n\
         {refresh}\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n{style}</style>\n\
         </head>\n\
         <body>\n\
         <main>\n\
         {body}\n\
         </main>\n\
         </body>\n\
         </html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_page() {
        let (html, safe) = redirect_page("https://example.com/a?b=1&c=2");
        assert!(safe);
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains(r#"<meta http-equiv="refresh" content="0; url=https://example.com/a?b=1&amp;c=2">"#));
        assert!(html.contains(r#"<meta name="referrer" content="no-referrer">"#));
        assert!(html.contains(&format!(r#"content="{CONTENT_SECURITY_POLICY}""#)));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_markup_in_url_is_escaped() {
        let (html, safe) = redirect_page("https://example.com/?q='x'");
        assert!(safe);
        assert!(!html.contains("'x'"));
    }

    #[test]
    fn test_unsafe_url_yields_placeholder() {
        let (html, safe) = redirect_page("javascript:alert(document.cookie)");
        assert!(!safe);
        assert!(html.contains("<title>Invalid link</title>"));
        assert!(!html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("javascript"));
    }
}
