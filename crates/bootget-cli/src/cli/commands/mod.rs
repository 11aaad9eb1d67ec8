//! CLI command handlers, one per file.

mod printenv;
mod wget;

pub use printenv::run_printenv;
pub use wget::{run_wget, WgetOptions};
