use super::escape_xml;
use crate::safe::to_safe_http_url;

/// macOS `.webloc` property list for `url`, with an empty string node if
/// `url` fails the safety check.
pub fn webloc(url: &str) -> (String, bool) {
    let safe = to_safe_http_url(url);
    let ok = safe.is_some();
    let value = escape_xml(&safe.unwrap_or_default());
    let plist = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
         <plist version=\"1.0\">\n\
         <dict>\n\
         \t<key>URL</key>\n\
         \t<string>{value}</string>\n\
         </dict>\n\
         </plist>\n"
    );
    (plist, ok)
}
