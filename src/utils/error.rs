//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::parser::TaskId;
use thiserror::Error;

/// Errors that can occur while reading the sample trace or the disassembly
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Malformed sample record at {source_name}:{line}: {reason}")]
    MalformedSampleRecord {
        source_name: String,
        line: usize,
        reason: String,
    },
}

/// Errors that can occur while building frequency tables
#[derive(Error, Debug)]
pub enum AggregateError {
    /// An attribution carried a task that never appeared in the trace.
    /// Only the correlator can produce attributions, so this is a bug.
    #[error("Internal invariant violated: attribution for unknown task '{0}'")]
    UnknownTask(TaskId),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty stack data")]
    EmptyStacks,

    #[error("Failed to render flamegraph: {0}")]
    Render(String),

    #[error("Flamegraph output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
