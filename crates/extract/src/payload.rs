use std::path::Path;

/// One file or paste handed to [`extract`](crate::extract): decoded text plus
/// whatever the caller knows about where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    name: Option<String>,
    media_type: Option<String>,
    text: String,
}

impl Payload {
    /// Wrap decoded text. A leading byte-order mark is dropped.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let text = match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        };
        Self { name: None, media_type: None, text }
    }

    /// Decode raw file bytes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes))
    }

    /// Declared file name, e.g. `bookmarks.html`.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declared media type, e.g. `text/csv; charset=utf-8`.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Lowercased extension of the declared name, without the dot.
    pub fn extension(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Path::new(name).extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase)
    }

    /// Lowercased declared media type with any parameters removed.
    pub fn essence(&self) -> Option<String> {
        let media_type = self.media_type.as_deref()?;
        let essence = media_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        Some(essence).filter(|essence| !essence.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_bom_is_dropped() {
        assert_eq!(Payload::new("\u{feff}a.com").text(), "a.com");
        assert_eq!(Payload::from_bytes(b"\xef\xbb\xbfa.com").text(), "a.com");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("Links.CSV"), Some("csv"))]
    #[case(Some("archive.tar.json"), Some("json"))]
    #[case(Some("README"), None)]
    #[case(Some(".hidden"), None)]
    fn test_extension(#[case] name: Option<&str>, #[case] expected: Option<&str>) {
        let mut payload = Payload::new("");
        if let Some(name) = name {
            payload = payload.with_name(name);
        }
        assert_eq!(payload.extension().as_deref(), expected);
    }

    #[rstest]
    #[case("Text/CSV; charset=utf-8", Some("text/csv"))]
    #[case("application/json", Some("application/json"))]
    #[case(" ; charset=utf-8", None)]
    fn test_essence(#[case] media_type: &str, #[case] expected: Option<&str>) {
        assert_eq!(Payload::new("").with_media_type(media_type).essence().as_deref(), expected);
    }
}
