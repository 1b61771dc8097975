//! Deterministic QR renderer for tests.

use super::{QrFormat, QrMatrix, QrRender, QrRenderer, render_svg};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const MATRIX_SIZE: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behaviour {
    Render,
    Empty,
    Fail,
}

/// Fake [`QrRenderer`].
///
/// SVG output is a real document drawn from a pattern derived from the URL
/// bytes; PNG output is the PNG signature followed by the URL. Neither scans.
pub struct MockQrRenderer {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl Default for MockQrRenderer {
    fn default() -> Self {
        Self { behaviour: Behaviour::Render, calls: AtomicUsize::new(0) }
    }
}

impl MockQrRenderer {
    /// A renderer that always returns zero bytes.
    pub fn empty() -> Self {
        Self { behaviour: Behaviour::Empty, ..Default::default() }
    }

    /// A renderer that always fails.
    pub fn failing() -> Self {
        Self { behaviour: Behaviour::Fail, ..Default::default() }
    }

    /// How many times [`render`](QrRenderer::render) was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matrix(url: &str) -> QrMatrix {
        let bytes = url.as_bytes();
        let modules = (0..MATRIX_SIZE * MATRIX_SIZE)
            .map(|i| bytes.is_empty() || bytes[i % bytes.len()].rotate_left((i % 8) as u32) & 1 == 1)
            .collect();
        let Some(matrix) = QrMatrix::new(MATRIX_SIZE, modules) else {
            panic!("MockQrRenderer: module count does not match the matrix size");
        };
        matrix
    }
}

#[async_trait]
impl QrRenderer for MockQrRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn render(&self, url: &str, format: QrFormat, options: &QrRender) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match (self.behaviour, format) {
            (Behaviour::Fail, _) => exn::bail!(ErrorKind::QrFailed(url.to_string())),
            (Behaviour::Empty, _) => Ok(Vec::new()),
            (Behaviour::Render, QrFormat::Svg) => Ok(render_svg(&Self::matrix(url), options).into_bytes()),
            (Behaviour::Render, QrFormat::Png) => Ok([PNG_SIGNATURE, url.as_bytes()].concat()),
        }
    }
}
