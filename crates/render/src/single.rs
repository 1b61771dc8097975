use crate::error::{ErrorKind, Result};
use crate::{OutputType, Rendered, render};
use exn::ResultExt;
use linkfile_naming::{clean_user_base_name, ensure_extension, link_filename};
use linkfile_url::{PrivacyMode, normalize};
use tracing::instrument;

/// A single shortcut file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleFile {
    pub filename: String,
    pub rendered: Rendered,
}

/// Render one URL outside of a batch.
///
/// `raw` is canonicalized and `privacy` applied first. The file is named
/// after `name` when it leaves a usable base name (a trailing output
/// extension the user typed is dropped), otherwise after the URL.
///
/// ```
/// use linkfile_render::{OutputType, single_file};
/// use linkfile_url::PrivacyMode;
///
/// let file = single_file("example.com/?utm_source=x", OutputType::Url, PrivacyMode::StripTracking, None).unwrap();
/// assert_eq!(file.filename, "example.url");
/// assert_eq!(file.rendered.contents, "[InternetShortcut]\nURL=https://example.com/\n");
/// ```
#[instrument(skip(raw, name), fields(output = %output, privacy = %privacy))]
pub fn single_file(raw: &str, output: OutputType, privacy: PrivacyMode, name: Option<&str>) -> Result<SingleFile> {
    let url = normalize(raw).or_raise(|| ErrorKind::InvalidUrl(raw.trim().to_string()))?;
    let effective = privacy.apply(&url);
    let filename = match name.and_then(clean_user_base_name) {
        Some(base) => ensure_extension(&base, output.extension()),
        None => link_filename(effective.as_str(), output.extension()),
    };
    Ok(SingleFile { filename, rendered: render(effective.as_str(), output) })
}
