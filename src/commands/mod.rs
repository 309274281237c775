//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod symbolize;
pub mod utils;

// Re-export main command functions
pub use models::SymbolizeArgs;
pub use symbolize::{execute_symbolize, validate_args};
pub use utils::{display_format, display_version, validate_report_file};
