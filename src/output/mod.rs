//! Output writers for symbolized reports and flamegraphs.
//!
//! This module handles:
//! - The human-readable stdout report
//! - JSON reports (versioned schema)
//! - SVG flamegraphs

pub mod json;
pub mod svg;
pub mod text;

// Re-export main functions
pub use json::{read_report, to_report, write_report};
pub use svg::write_svg;
pub use text::{format_frequency, print_report, render_report, TextReport};
