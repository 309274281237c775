//! Attribution of samples to disassembly lines.
//!
//! This module owns the running "enclosing function" state and the
//! working set of unattributed samples.

pub mod engine;
pub mod pending;

// Re-export main types and functions
pub use engine::{correlate, Attribution, Correlation, Correlator, MatchMode};
pub use pending::PendingSamples;
