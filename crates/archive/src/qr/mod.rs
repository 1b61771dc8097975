//! QR code rendering, as a capability supplied by the caller.
//!
//! A [`QrRenderer`] is handed to the [`ArchiveBuilder`](crate::ArchiveBuilder)
//! when QR files are wanted. [`QrCodeRenderer`] is the real one; renderers that
//! produce a module matrix can use [`render_svg`] for the SVG output.

mod encoder;
#[cfg(any(test, feature = "mock"))]
mod mock;

use crate::error::Result;
use async_trait::async_trait;
use derive_more::Display;
pub use encoder::QrCodeRenderer;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockQrRenderer;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub type QrHandle = Arc<dyn QrRenderer>;

pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 64;
pub const MAX_MARGIN: u32 = 32;
const DEFAULT_SCALE: u32 = 8;

/// Image format of a QR file.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QrFormat {
    #[display("svg")]
    Svg,
    #[display("png")]
    Png,
}

impl QrFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Error correction level.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ecc {
    L,
    #[default]
    M,
    Q,
    H,
}

impl FromStr for Ecc {
    type Err = ();

    /// Case-insensitive; unknown levels are an error.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(()),
        }
    }
}

/// How QR images should look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrRender {
    pub foreground: String,
    pub background: String,
    /// Skip painting the background.
    pub transparent: bool,
    /// Quiet zone, in modules.
    pub margin: u32,
    /// Pixels per module. Also accepts `small`, `medium`, `large` and `xl`.
    #[serde(deserialize_with = "deserialize_scale")]
    pub scale: u32,
    pub ecc: Ecc,
}

impl Default for QrRender {
    fn default() -> Self {
        Self {
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            transparent: false,
            margin: 4,
            scale: DEFAULT_SCALE,
            ecc: Ecc::M,
        }
    }
}

impl QrRender {
    /// Margin and scale pulled into their allowed ranges.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self { margin: self.margin.min(MAX_MARGIN), scale: self.scale.clamp(MIN_SCALE, MAX_SCALE), ..self.clone() }
    }

    pub fn is_in_range(&self) -> bool {
        self.margin <= MAX_MARGIN && (MIN_SCALE..=MAX_SCALE).contains(&self.scale)
    }
}

/// Pixels per module for a number or a named size; anything else is `8`.
pub fn resolve_scale(value: &str) -> u32 {
    let value = value.trim().to_ascii_lowercase();
    if let Ok(n) = value.parse::<u32>() {
        return n;
    }
    match value.as_str() {
        "small" => 6,
        "medium" => 8,
        "large" => 10,
        "xl" | "xlarge" => 12,
        _ => DEFAULT_SCALE,
    }
}

fn deserialize_scale<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scale {
        Number(u32),
        Name(String),
    }
    Ok(match Scale::deserialize(deserializer)? {
        Scale::Number(n) => n,
        Scale::Name(name) => resolve_scale(&name),
    })
}

/// Something that can turn a URL into a QR image.
///
/// Implementations must be pure: the same inputs give the same bytes.
#[async_trait]
pub trait QrRenderer: Send + Sync {
    fn name(&self) -> &str;

    /// Render `url` as `format`. An empty result counts as "nothing produced".
    async fn render(&self, url: &str, format: QrFormat, options: &QrRender) -> Result<Vec<u8>>;
}

/// Square grid of QR modules, row-major, `true` for dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// `None` unless `modules` holds exactly `size * size` entries.
    pub fn new(size: usize, modules: Vec<bool>) -> Option<Self> {
        (modules.len() == size * size).then_some(Self { size, modules })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x]
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

/// SVG document for `matrix`: one unit per module, scaled through the
/// `width`/`height` attributes.
pub fn render_svg(matrix: &QrMatrix, options: &QrRender) -> String {
    let options = options.clamped();
    let margin = options.margin as usize;
    let total = matrix.size() + margin * 2;
    let pixels = total * options.scale as usize;
    let background = match options.transparent {
        true => String::new(),
        false => format!("<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", escape_attr(&options.background)),
    };
    let mut rects = String::new();
    for y in 0..matrix.size() {
        for x in (0..matrix.size()).filter(|x| matrix.is_dark(*x, y)) {
            rects.push_str(&format!("<rect x=\"{}\" y=\"{}\" width=\"1\" height=\"1\" />", x + margin, y + margin));
        }
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{pixels}\" height=\"{pixels}\" \
         viewBox=\"0 0 {total} {total}\" shape-rendering=\"crispEdges\">\
         {background}<g fill=\"{}\">{rects}</g></svg>\n",
        escape_attr(&options.foreground),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("12", 12)]
    #[case(" Small ", 6)]
    #[case("medium", 8)]
    #[case("large", 10)]
    #[case("xlarge", 12)]
    #[case("huge", 8)]
    fn test_resolve_scale(#[case] value: &str, #[case] expected: u32) {
        assert_eq!(resolve_scale(value), expected);
    }

    #[test]
    fn test_deserialize() {
        let render: QrRender =
            serde_json::from_value(json!({ "scale": "xl", "ecc": "H", "transparent": true })).unwrap();
        assert_eq!(render, QrRender { scale: 12, ecc: Ecc::H, transparent: true, ..Default::default() });
        let render: QrRender = serde_json::from_value(json!({ "scale": 3, "margin": 0 })).unwrap();
        assert_eq!((render.scale, render.margin), (3, 0));
    }

    #[rstest]
    #[case(4, 8, 4, 8, true)]
    #[case(33, 0, 32, 1, false)]
    #[case(0, 65, 0, 64, false)]
    fn test_clamped(
        #[case] margin: u32,
        #[case] scale: u32,
        #[case] clamped_margin: u32,
        #[case] clamped_scale: u32,
        #[case] in_range: bool,
    ) {
        let render = QrRender { margin, scale, ..Default::default() };
        assert_eq!(render.is_in_range(), in_range);
        let clamped = render.clamped();
        assert_eq!((clamped.margin, clamped.scale), (clamped_margin, clamped_scale));
        assert!(clamped.is_in_range());
    }

    #[test]
    fn test_ecc_from_str() {
        assert_eq!(" q".parse::<Ecc>(), Ok(Ecc::Q));
        assert_eq!("X".parse::<Ecc>(), Err(()));
    }

    #[test]
    fn test_render_svg() {
        let matrix = QrMatrix::new(2, vec![true, false, false, true]).unwrap();
        let options = QrRender { margin: 1, scale: 10, foreground: "\"red\"".into(), ..Default::default() };
        let svg = render_svg(&matrix, &options);
        assert!(svg.contains("width=\"40\" height=\"40\" viewBox=\"0 0 4 4\""));
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"));
        assert!(svg.contains(
            "<g fill=\"&quot;red&quot;\"><rect x=\"1\" y=\"1\" width=\"1\" height=\"1\" />\
             <rect x=\"2\" y=\"2\" width=\"1\" height=\"1\" /></g>"
        ));

        let transparent = render_svg(&matrix, &QrRender { transparent: true, ..Default::default() });
        assert!(!transparent.contains("100%"));
    }

    #[test]
    fn test_matrix_shape() {
        assert!(QrMatrix::new(3, vec![false; 8]).is_none());
        let matrix = QrMatrix::new(1, vec![true]).unwrap();
        assert!(matrix.is_dark(0, 0));
        assert!(!matrix.is_dark(1, 0));
    }
}
