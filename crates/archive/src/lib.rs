//! ZIP archives of a planned batch.
//!
//! One link file per item, optional CSV/JSON exports and QR images, and a
//! `manifest.json`. See [`ArchiveBuilder`].

mod builder;
pub mod error;
mod manifest;
pub mod qr;

pub use crate::builder::{Archive, ArchiveBuilder, CSV_EXPORT_NAME, JSON_EXPORT_NAME, MANIFEST_NAME, QR_FOLDER};
pub use crate::qr::{QrCodeRenderer, QrHandle, QrRender, QrRenderer};
