//! URL canonicalization for link batches.
//!
//! Everything here is a total, pure function of its input: [`normalize`]
//! returns a [`NormalizedUrl`] or an [`Invalid`] reason, [`PrivacyMode`]
//! trims what survives into generated files, and [`dedupe_key`] produces the
//! comparison key for duplicate detection at a chosen [`DedupeMode`].
//!
//! ```
//! use linkfile_url::{DedupeMode, PrivacyMode, dedupe_key, normalize};
//!
//! let url = normalize("EXAMPLE.com/?utm_source=mail&id=7").unwrap();
//! let effective = PrivacyMode::StripTracking.apply(&url);
//! assert_eq!(effective.as_str(), "https://example.com/?id=7");
//! assert_eq!(dedupe_key(effective.as_str(), DedupeMode::Exact), "https://example.com/?id=7");
//! ```

mod consts;
mod dedupe;
pub mod error;
mod normalize;
mod privacy;

pub use crate::dedupe::{DedupeMode, dedupe_key};
pub use crate::error::{Invalid, UnknownMode};
pub use crate::normalize::{NormalizedUrl, is_valid_host, normalize};
pub use crate::privacy::PrivacyMode;
