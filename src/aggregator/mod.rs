//! Aggregation of attributions into frequency tables and stacks.
//!
//! This module transforms correlator output into:
//! - Per-task frequency tables over functions and instructions
//! - Collapsed stack format (for flamegraph generation)

pub mod frequency;
pub mod stack_builder;

// Re-export main types and functions
pub use frequency::{aggregate, normalize, Aggregator, FrequencyTable, SampleProfile, TaskHistogram};
pub use stack_builder::{build_collapsed_stacks, CollapsedStack};
