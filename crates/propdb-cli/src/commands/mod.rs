//! Command implementations for propdb-cli
//!
//! Each command has a `render_*` function that formats its output and a
//! `run_*` function that prints it.

pub mod dump;
pub mod explain;
pub mod get;

pub use dump::run_dump;
pub use explain::run_explain;
pub use get::run_get;
