//! One file per subcommand. Each `run_*` reads its input, does the work and
//! writes the result; the pieces in between are plain functions so tests can
//! drive them without stdin or stdout.

mod archive;
mod export;
mod import;
mod plan;
mod session;
mod single;

pub use archive::run_archive;
pub use export::run_export;
pub use import::run_import;
pub use plan::run_plan;
pub use session::run_session;
pub use single::run_single;
