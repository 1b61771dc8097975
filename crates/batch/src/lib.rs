//! Batch planning.
//!
//! A [`Plan`] is built from newline-separated text: every line is
//! canonicalized, partitioned into valid and invalid items, and optionally
//! deduplicated, all without reordering. The caller-held [`Session`] bag and
//! the [`BatchFile`] save format live here as well.

pub mod error;
mod options;
mod plan;
mod session;

pub use crate::options::BatchOptions;
pub use crate::plan::{BatchItem, InvalidItem, Plan, build_plan, dedupe, normalize_unique, parse_lines};
pub use crate::session::{BATCH_FILE_KIND, BATCH_FILE_VERSION, BatchFile, BatchInput, MergeMode, Session, timestamp};
