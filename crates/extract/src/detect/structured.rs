//! JSON: saved sessions, browser bookmark exports and ad-hoc record lists.

use super::{Detected, found, looks_url_like};
use linkfile_batch::BatchFile;
use serde_json::{Map, Value};

/// Record keys that may hold a URL, in priority order.
const URL_KEYS: [&str; 8] = ["url", "uri", "href", "link", "website", "web", "target", "address"];
/// Object keys that may hold the list of records, in priority order.
const LIST_KEYS: [&str; 8] = ["urls", "links", "bookmarks", "items", "entries", "records", "results", "data"];
/// Named roots of a Chromium `Bookmarks` file.
const CHROMIUM_ROOTS: [&str; 3] = ["bookmark_bar", "other", "synced"];

const MOZ_CONTAINER: &str = "text/x-moz-place-container";
const MOZ_PLACE: &str = "text/x-moz-place";

/// Try, in order: saved session, Firefox bookmark tree, Chromium bookmarks,
/// top-level array, object with a list-valued key, single record.
pub(crate) fn detect(text: &str) -> Option<Detected> {
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .inspect_err(|err| tracing::debug!(error = %err, "Not valid JSON"))
        .ok()?;
    if let Some(file) = BatchFile::from_value(&value) {
        return Some(Detected::Session(file));
    }
    let urls = match &value {
        Value::Array(items) => from_list(items),
        Value::Object(object) => firefox(&value)
            .or_else(|| chromium(object))
            .or_else(|| list_value(object).map(|items| from_list(items)))
            .or_else(|| from_record(object).map(|url| vec![url]))
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    found(urls)
}

fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}

fn children(node: &Value) -> &[Value] {
    node.get("children").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
}

fn is_moz_container(node: &Value) -> bool {
    str_field(node, "type") == Some(MOZ_CONTAINER) || node.get("typeCode").and_then(Value::as_u64) == Some(2)
}

fn is_moz_place(node: &Value) -> bool {
    str_field(node, "type") == Some(MOZ_PLACE) || node.get("typeCode").and_then(Value::as_u64) == Some(1)
}

fn looks_like_moz_tree(node: &Value) -> bool {
    matches!(str_field(node, "type"), Some(MOZ_CONTAINER | MOZ_PLACE))
        || str_field(node, "guid").is_some()
        || str_field(node, "root").is_some()
        || node.get("children").is_some_and(Value::is_array)
}

fn is_moz_toolbar(node: &Value) -> bool {
    is_moz_container(node)
        && (str_field(node, "root") == Some("toolbarFolder")
            || str_field(node, "guid") == Some("toolbar_____")
            || str_field(node, "title") == Some("toolbar"))
}

fn find_moz_toolbar(root: &Value) -> Option<&Value> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if is_moz_toolbar(node) {
            return Some(node);
        }
        stack.extend(children(node));
    }
    None
}

fn collect_moz_places(node: &Value, out: &mut Vec<String>) {
    if is_moz_place(node)
        && let Some(uri) = str_field(node, "uri")
    {
        out.push(uri.trim().to_string());
    }
    for child in children(node) {
        collect_moz_places(child, out);
    }
}

/// Firefox bookmark backup: prefer the toolbar, else the whole tree.
fn firefox(value: &Value) -> Option<Vec<String>> {
    if !looks_like_moz_tree(value) {
        return None;
    }
    let mut urls = Vec::new();
    if let Some(toolbar) = find_moz_toolbar(value) {
        collect_moz_places(toolbar, &mut urls);
    }
    if urls.is_empty() {
        collect_moz_places(value, &mut urls);
    }
    Some(urls).filter(|urls| !urls.is_empty())
}

fn collect_chromium(node: &Value, out: &mut Vec<String>) {
    if let Some(url) = str_field(node, "url") {
        out.push(url.trim().to_string());
    }
    for child in children(node) {
        collect_chromium(child, out);
    }
}

/// Chromium `Bookmarks` file: walk each named root.
fn chromium(object: &Map<String, Value>) -> Option<Vec<String>> {
    let roots = object.get("roots")?.as_object()?;
    let mut urls = Vec::new();
    for root in CHROMIUM_ROOTS.iter().filter_map(|name| roots.get(*name)) {
        collect_chromium(root, &mut urls);
    }
    Some(urls).filter(|urls| !urls.is_empty())
}

/// Look up `key` exactly, else case-insensitively. Later keys win among
/// case-insensitive duplicates.
fn get_ignore_case<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| object.iter().filter(|(k, _)| k.to_lowercase() == key).map(|(_, v)| v).last())
}

fn from_record(object: &Map<String, Value>) -> Option<String> {
    URL_KEYS
        .iter()
        .filter_map(|key| get_ignore_case(object, key))
        .chain(object.get("raw"))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|candidate| looks_url_like(candidate))
        .map(str::to_string)
}

fn from_primitive(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    looks_url_like(&text).then_some(text)
}

/// Records when the first element is an object, otherwise URL-like primitives.
fn from_list(items: &[Value]) -> Vec<String> {
    match items.first() {
        Some(Value::Object(_)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(object) => from_record(object),
                other => from_primitive(other),
            })
            .collect(),
        _ => items.iter().filter_map(from_primitive).collect(),
    }
}

fn list_value(object: &Map<String, Value>) -> Option<&[Value]> {
    LIST_KEYS.iter().find_map(|key| {
        object
            .get(*key)
            .filter(|value| value.is_array())
            .or_else(|| object.iter().find(|(k, _)| k.to_lowercase() == *key).map(|(_, v)| v))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkfile_batch::BATCH_FILE_KIND;
    use rstest::rstest;
    use serde_json::json;

    fn urls(value: Value) -> Vec<String> {
        match detect(&value.to_string()) {
            Some(Detected::Urls(urls)) => urls,
            other => panic!("expected URLs, got {other:?}"),
        }
    }

    #[test]
    fn test_session_passes_through() {
        let text = format!(
            "\u{feff}{{\"kind\":\"{BATCH_FILE_KIND}\",\"version\":1,\
             \"createdAt\":\"x\",\"input\":{{\"lines\":[\"a.com\"]}}}}"
        );
        let Some(Detected::Session(file)) = detect(&text) else {
            panic!("session not recognised");
        };
        assert_eq!(file.input.lines, ["a.com"]);
    }

    #[test]
    fn test_session_with_wrong_version_is_a_record() {
        let value = json!({ "kind": BATCH_FILE_KIND, "version": 2, "url": "https://a.com" });
        assert_eq!(urls(value), ["https://a.com"]);
    }

    #[test]
    fn test_firefox_prefers_toolbar() {
        let value = json!({
            "guid": "root________",
            "type": MOZ_CONTAINER,
            "children": [
                { "guid": "menu________", "type": MOZ_CONTAINER, "root": "bookmarksMenuFolder", "children": [
                    { "type": MOZ_PLACE, "uri": "https://menu.example" },
                ]},
                { "guid": "toolbar_____", "typeCode": 2, "root": "toolbarFolder", "children": [
                    { "typeCode": 1, "uri": "https://one.example" },
                    { "type": MOZ_CONTAINER, "title": "Folder", "children": [
                        { "type": MOZ_PLACE, "uri": "https://two.example" },
                    ]},
                    { "type": "text/x-moz-place-separator" },
                ]},
            ],
        });
        assert_eq!(urls(value), ["https://one.example", "https://two.example"]);
    }

    #[test]
    fn test_firefox_whole_tree_without_toolbar() {
        let value = json!({
            "root": "placesRoot",
            "children": [
                { "type": MOZ_CONTAINER, "root": "toolbarFolder", "children": [] },
                { "type": MOZ_CONTAINER, "title": "Other", "children": [
                    { "type": MOZ_PLACE, "uri": "https://a.example" },
                    { "type": MOZ_PLACE, "title": "no uri" },
                    { "type": MOZ_PLACE, "uri": "https://b.example" },
                ]},
            ],
        });
        assert_eq!(urls(value), ["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_chromium_roots() {
        let value = json!({
            "checksum": "abc",
            "roots": {
                "synced": { "children": [{ "type": "url", "url": "https://synced.example" }] },
                "bookmark_bar": { "children": [
                    { "type": "url", "url": "https://bar.example" },
                    { "type": "folder", "children": [{ "type": "url", "url": "https://nested.example" }] },
                ]},
                "other": { "children": [] },
            },
            "version": 1,
        });
        assert_eq!(urls(value), ["https://bar.example", "https://nested.example", "https://synced.example"]);
    }

    #[rstest]
    #[case(
        json!([{ "URL": "https://a.com" }, { "name": "x", "Link": "b.com" }, null, { "name": "none" }]),
        vec!["https://a.com", "b.com"]
    )]
    #[case(json!([{ "href": "not a url", "website": "www.c.org" }]), vec!["www.c.org"])]
    #[case(json!([{ "raw": "d.net" }, "e.io", 42]), vec!["d.net", "e.io"])]
    #[case(json!(["https://a.com", " b.com ", "plain text", true]), vec!["https://a.com", "b.com"])]
    fn test_arrays(#[case] value: Value, #[case] expected: Vec<&str>) {
        assert_eq!(urls(value), expected);
    }

    #[rstest]
    #[case(json!({ "meta": 1, "links": ["https://a.com"] }), vec!["https://a.com"])]
    #[case(json!({ "Items": [{ "uri": "https://b.com" }] }), vec!["https://b.com"])]
    #[case(json!({ "urls": "nope", "DATA": ["c.com"] }), vec!["c.com"])]
    #[case(json!({ "title": "Single", "address": "https://d.com" }), vec!["https://d.com"])]
    fn test_objects(#[case] value: Value, #[case] expected: Vec<&str>) {
        assert_eq!(urls(value), expected);
    }

    #[rstest]
    #[case("{not json")]
    #[case("42")]
    #[case("[]")]
    #[case("{\"name\": \"nothing here\"}")]
    #[case("{\"links\": []}")]
    fn test_no_match(#[case] text: &str) {
        assert_eq!(detect(text), None);
    }
}
