//! Configuration and constants for the CLI.
//!
//! The sample record layout is a contract with the upstream sampling
//! profiler. The offsets below describe record format version 1 and can be
//! overridden per run from the command line.

/// Version of the fixed-width sample record layout described below
pub const SAMPLE_RECORD_FORMAT_VERSION: &str = "1";

/// First byte of the hex address field (inclusive)
pub const SAMPLE_ADDRESS_START: usize = 4;

/// End of the hex address field (exclusive)
pub const SAMPLE_ADDRESS_END: usize = 20;

/// Byte offset of the task identifier
pub const SAMPLE_TASK_OFFSET: usize = 21;

/// Width of the task identifier field
pub const SAMPLE_TASK_WIDTH: usize = 1;

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// Labels used in attributions and reports
pub const FUNCTION_HEADER_MARKER: &str = "Function Header IP (no associated instruction)";
pub const UNRESOLVED_FUNCTION_LABEL: &str = "(unknown function)";

/// Default flamegraph title and width
pub const DEFAULT_FLAMEGRAPH_TITLE: &str = "Instruction Pointer Samples";
pub const DEFAULT_FLAMEGRAPH_WIDTH: usize = 1200;
