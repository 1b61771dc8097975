//! Shortcut file renderers.
//!
//! Each [`OutputType`] has a pure renderer taking a URL and returning the
//! file contents and media type. Renderers re-check the URL right before
//! writing it; anything that is not a clean `http`/`https` URL produces a
//! harmless placeholder instead of an error, flagged via [`Rendered::safe`].

mod assets;
pub mod error;
mod formats;
mod output;
mod safe;
mod single;

pub use crate::assets::Builtins;
pub use crate::formats::{internet_shortcut, redirect_page, webloc};
pub use crate::output::OutputType;
pub use crate::safe::to_safe_http_url;
pub use crate::single::{SingleFile, single_file};
use tracing::instrument;

/// Rendered shortcut file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub contents: String,
    pub media_type: &'static str,
    /// `false` when the URL failed the safety check and a placeholder was written.
    pub safe: bool,
}

impl Rendered {
    pub fn into_bytes(self) -> Vec<u8> {
        self.contents.into_bytes()
    }
}

/// Render `url` as `output`.
///
/// ```
/// use linkfile_render::{OutputType, render};
///
/// let file = render("https://example.com/", OutputType::Webloc);
/// assert!(file.safe);
/// assert_eq!(file.media_type, "application/xml;charset=utf-8");
/// assert!(file.contents.contains("<string>https://example.com/</string>"));
/// ```
#[instrument(skip(url), fields(output = %output))]
pub fn render(url: &str, output: OutputType) -> Rendered {
    let (contents, safe) = match output {
        OutputType::Html => redirect_page(url),
        OutputType::Url => internet_shortcut(url),
        OutputType::Webloc => webloc(url),
    };
    if !safe {
        tracing::warn!(url, "URL failed the safety check, wrote a placeholder");
    }
    Rendered { contents, media_type: output.media_type(), safe }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OutputType::Html)]
    #[case(OutputType::Url)]
    #[case(OutputType::Webloc)]
    fn test_every_format_degrades_on_unsafe_input(#[case] output: OutputType) {
        let rendered = render("javascript:alert(1)", output);
        assert!(!rendered.safe);
        assert!(!rendered.contents.contains("javascript"));
        assert_eq!(rendered.media_type, output.media_type());
    }

    #[rstest]
    #[case(OutputType::Html)]
    #[case(OutputType::Url)]
    #[case(OutputType::Webloc)]
    fn test_every_format_embeds_safe_url(#[case] output: OutputType) {
        let rendered = render("https://example.com/path", output);
        assert!(rendered.safe);
        assert!(rendered.contents.contains("https://example.com/path"));
    }
}
