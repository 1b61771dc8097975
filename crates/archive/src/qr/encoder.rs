//! QR renderer backed by the [`qrcode`] encoder.

use super::{Ecc, QrFormat, QrMatrix, QrRender, QrRenderer, render_svg};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::{OptionExt, ResultExt};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

/// Encodes URLs as real, scannable QR symbols. SVG and PNG are both supported.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrCodeRenderer;

impl QrCodeRenderer {
    fn matrix(url: &str, ecc: Ecc) -> Result<QrMatrix> {
        let level = match ecc {
            Ecc::L => EcLevel::L,
            Ecc::M => EcLevel::M,
            Ecc::Q => EcLevel::Q,
            Ecc::H => EcLevel::H,
        };
        let code = QrCode::with_error_correction_level(url.as_bytes(), level)
            .or_raise(|| ErrorKind::QrFailed(url.to_string()))?;
        let modules = code.to_colors().into_iter().map(|color| color == Color::Dark).collect();
        QrMatrix::new(code.width(), modules).ok_or_raise(|| ErrorKind::QrFailed(url.to_string()))
    }
}

/// `#rgb` or `#rrggbb`; anything else is `None`.
fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0; 3];
            for (i, c) in hex.chars().enumerate() {
                rgb[i] = channel(&c.to_string())? * 17;
            }
            Some(rgb)
        },
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        _ => None,
    }
}

fn render_png(matrix: &QrMatrix, options: &QrRender) -> Result<Vec<u8>> {
    let options = options.clamped();
    let [r, g, b] = parse_hex_color(&options.foreground).unwrap_or(BLACK);
    let foreground = Rgba([r, g, b, 255]);
    let [r, g, b] = parse_hex_color(&options.background).unwrap_or(WHITE);
    let background = Rgba([r, g, b, if options.transparent { 0 } else { 255 }]);

    let scale = options.scale;
    let margin = options.margin;
    let side = (matrix.size() as u32 + margin * 2) * scale;
    let mut image = RgbaImage::from_pixel(side, side, background);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let (mx, my) = (x / scale, y / scale);
        if mx < margin || my < margin {
            continue;
        }
        if matrix.is_dark((mx - margin) as usize, (my - margin) as usize) {
            *pixel = foreground;
        }
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(image.as_raw(), side, side, ExtendedColorType::Rgba8)
        .or_raise(|| ErrorKind::QrFailed("PNG encoding".to_string()))?;
    Ok(png)
}

#[async_trait]
impl QrRenderer for QrCodeRenderer {
    fn name(&self) -> &str {
        "qrcode"
    }

    async fn render(&self, url: &str, format: QrFormat, options: &QrRender) -> Result<Vec<u8>> {
        let matrix = Self::matrix(url, options.ecc)?;
        tracing::trace!(url, size = matrix.size(), %format, "encoded QR symbol");
        match format {
            QrFormat::Svg => Ok(render_svg(&matrix, options).into_bytes()),
            QrFormat::Png => render_png(&matrix, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#000000", Some(BLACK))]
    #[case("#FFF", Some(WHITE))]
    #[case(" #1a2B3c ", Some([0x1a, 0x2b, 0x3c]))]
    #[case("red", None)]
    #[case("#12345", None)]
    #[case("#ééé", None)]
    fn test_parse_hex_color(#[case] value: &str, #[case] expected: Option<[u8; 3]>) {
        assert_eq!(parse_hex_color(value), expected);
    }

    #[test]
    fn test_matrix_is_a_real_symbol() {
        let matrix = QrCodeRenderer::matrix("https://example.com/", Ecc::M).unwrap();
        // Version 2 at level M holds 20 bytes; this URL needs it.
        assert_eq!(matrix.size(), 25);
        // Finder pattern corners are dark.
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(24, 0));
        assert!(matrix.is_dark(0, 24));
    }

    #[tokio::test]
    async fn test_render_svg() {
        let svg = QrCodeRenderer.render("https://example.com/", QrFormat::Svg, &QrRender::default()).await.unwrap();
        let svg = String::from_utf8(svg).unwrap();
        // 25 modules plus a quiet zone of 4 on each side, 8 pixels per module.
        assert!(svg.contains("width=\"264\" height=\"264\" viewBox=\"0 0 33 33\""));
        assert!(svg.contains("<rect x=\"4\" y=\"4\" width=\"1\" height=\"1\" />"));
    }

    #[tokio::test]
    async fn test_render_png() {
        let options = QrRender { margin: 1, scale: 2, transparent: true, ..Default::default() };
        let png = QrCodeRenderer.render("https://example.com/", QrFormat::Png, &options).await.unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
        let image = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (54, 54));
        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 0]));
        assert_eq!(image.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
    }

    #[tokio::test]
    async fn test_too_long_for_a_symbol() {
        let url = format!("https://example.com/{}", "a".repeat(3000));
        let err = QrCodeRenderer.render(&url, QrFormat::Svg, &QrRender::default()).await.unwrap_err();
        assert_eq!(*err, ErrorKind::QrFailed(url));
    }
}
