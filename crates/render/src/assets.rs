//! Stylesheets for generated pages, embedded at compile time with
//! [`rust-embed`](rust_embed).

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "../../assets/pages/"]
pub struct Builtins;

impl Builtins {
    /// Text of the embedded page asset `name`. Invalid UTF-8 is replaced.
    pub fn load_str(name: &str) -> Result<String> {
        let file = Self::get(name).ok_or_raise(|| ErrorKind::AssetNotFound(format!("pages/{name}")))?;
        Ok(String::from_utf8_lossy(&file.data).into_owned())
    }
}
