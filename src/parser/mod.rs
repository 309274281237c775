//! Input parsing and schema definitions.
//!
//! This module handles:
//! - Reading the fixed-width sample trace
//! - Streaming and classifying the disassembly listing
//! - Defining the JSON report schema

pub mod disassembly;
pub mod samples;
pub mod schema;

// Re-export main types
pub use disassembly::{DisassemblyLine, DisassemblyReader, LineKind};
pub use samples::{
    parse_samples, read_samples, MalformedPolicy, Sample, SampleLayout, SampleTrace, TaskId,
};
pub use schema::{RankedEntry, SymbolizedReport, TaskReport, UnmatchedEntry};
