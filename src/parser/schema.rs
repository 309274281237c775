//! Output JSON schema definitions for symbolized reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use super::samples::TaskId;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolizedReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Disassembly listing the samples were resolved against
    pub disassembly: String,

    /// Sample trace that was loaded
    pub samples_file: String,

    /// Address matching mode used for correlation
    pub match_mode: String,

    /// Samples loaded from the trace (normalization denominator)
    pub total_samples: u64,

    pub matched_samples: u64,

    pub unmatched_samples: u64,

    /// Malformed records skipped while reading the trace
    #[serde(default)]
    pub skipped_records: u64,

    /// Per-task frequency tables, in first-seen task order
    pub tasks: Vec<TaskReport>,

    /// Samples that never matched a disassembly line
    #[serde(default)]
    pub unmatched: Vec<UnmatchedEntry>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Frequency tables of one task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub task_id: TaskId,

    pub matched_samples: u64,

    /// Functions, most sampled first
    pub functions: Vec<RankedEntry>,

    /// Instruction mnemonics (or the header marker), most sampled first
    pub instructions: Vec<RankedEntry>,
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,

    /// Raw sample count
    pub count: u64,

    /// Count divided by the total number of samples loaded
    pub frequency: f64,
}

/// A sample left over after correlation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedEntry {
    pub address: String,
    pub task_id: TaskId,
}
