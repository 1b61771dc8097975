//! Filename synthesis for generated link files.
//!
//! Names are derived from the URL ([`safe_base_name_from_url`]), made safe
//! for every common filesystem ([`ensure_safe_filename`]) and then claimed
//! from a per-operation [`UsedNames`] set so that no two files in the same
//! batch collide.
//!
//! ```
//! use linkfile_naming::{UsedNames, ensure_safe_filename, safe_base_name_from_url};
//!
//! let mut used = UsedNames::new();
//! let names: Vec<String> = ["https://example.com/a", "https://example.com/b"]
//!     .iter()
//!     .map(|url| used.make_unique(ensure_safe_filename(&safe_base_name_from_url(url), "url")))
//!     .collect();
//! assert_eq!(names, ["example.url", "example-2.url"]);
//! ```

mod base;
mod consts;
mod sanitize;
mod unique;

pub use crate::base::safe_base_name_from_url;
pub use crate::sanitize::{
    SanitizeOptions, archive_name, clean_user_base_name, ensure_extension, ensure_safe_filename, sanitize_base_name,
    sanitize_filename,
};
pub use crate::unique::UsedNames;

/// Link file name for `url`: derived base, made safe, with `ext` ensured.
pub fn link_filename(url: &str, ext: &str) -> String {
    ensure_safe_filename(&safe_base_name_from_url(url), ext)
}
