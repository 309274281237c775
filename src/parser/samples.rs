//! Sample trace reader.
//!
//! The upstream profiler writes one fixed-width text record per sample:
//! a hex instruction pointer at a known column range and a task identifier
//! at a known column. The layout is not self-describing, so it is carried
//! around as an explicit [`SampleLayout`] value.

use crate::utils::config::{
    SAMPLE_ADDRESS_END, SAMPLE_ADDRESS_START, SAMPLE_TASK_OFFSET, SAMPLE_TASK_WIDTH,
};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Identifier of the unit of execution a sample was taken on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single sampled instruction pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Address token exactly as written by the profiler (trimmed)
    pub address: String,

    /// Task the sample was taken on
    pub task_id: TaskId,
}

impl Sample {
    pub fn new(address: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            task_id: TaskId::new(task_id),
        }
    }
}

/// Byte layout of one sample record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLayout {
    pub address_start: usize,
    pub address_end: usize,
    pub task_offset: usize,
    pub task_width: usize,
}

impl Default for SampleLayout {
    fn default() -> Self {
        Self {
            address_start: SAMPLE_ADDRESS_START,
            address_end: SAMPLE_ADDRESS_END,
            task_offset: SAMPLE_TASK_OFFSET,
            task_width: SAMPLE_TASK_WIDTH,
        }
    }
}

impl SampleLayout {
    /// End of the task field, `None` if it does not fit in `usize`
    pub fn task_end(&self) -> Option<usize> {
        self.task_offset.checked_add(self.task_width)
    }

    /// Shortest record that still holds every field
    pub fn min_record_len(&self) -> Option<usize> {
        self.task_end().map(|task_end| self.address_end.max(task_end))
    }

    /// Check that the fields are non-empty and do not overlap
    pub fn check(&self) -> Result<(), String> {
        if self.address_start >= self.address_end {
            return Err(format!(
                "address field {}..{} is empty",
                self.address_start, self.address_end
            ));
        }
        if self.task_width == 0 {
            return Err("task field width must be greater than 0".to_string());
        }
        let task_end = self.task_end().ok_or_else(|| {
            format!(
                "task field offset {} + width {} overflows",
                self.task_offset, self.task_width
            )
        })?;
        if self.task_offset < self.address_end && self.address_start < task_end {
            return Err(format!(
                "task field {}..{} overlaps address field {}..{}",
                self.task_offset, task_end, self.address_start, self.address_end
            ));
        }
        Ok(())
    }
}

/// What to do with a record that does not fit the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MalformedPolicy {
    /// Abort the run at the first malformed record
    #[default]
    Fail,
    /// Log, skip and count malformed records
    Skip,
}

/// Samples read from one trace
#[derive(Debug, Clone, Default)]
pub struct SampleTrace {
    pub samples: Vec<Sample>,

    /// Malformed records dropped under [`MalformedPolicy::Skip`]
    pub skipped: usize,
}

/// Read a sample trace file
///
/// **Public** - main entry point for sample loading
///
/// # Errors
/// * `ParseError::Io` - File cannot be opened or read
/// * `ParseError::MalformedSampleRecord` - Bad record under `MalformedPolicy::Fail`
pub fn read_samples(
    path: impl AsRef<Path>,
    layout: &SampleLayout,
    policy: MalformedPolicy,
) -> Result<SampleTrace, ParseError> {
    let path = path.as_ref();
    let source_name = path.display().to_string();

    debug!("Reading samples from: {}", source_name);

    let file = File::open(path).map_err(|error| ParseError::Io {
        source_name: source_name.clone(),
        error,
    })?;

    parse_samples(BufReader::new(file), &source_name, layout, policy)
}

/// Parse sample records from any buffered reader
///
/// **Public** - used by `read_samples` and by tests on in-memory traces
pub fn parse_samples<R: BufRead>(
    reader: R,
    source_name: &str,
    layout: &SampleLayout,
    policy: MalformedPolicy,
) -> Result<SampleTrace, ParseError> {
    let mut trace = SampleTrace::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|error| ParseError::Io {
            source_name: source_name.to_string(),
            error,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        match parse_record(&line, layout) {
            Ok(sample) => trace.samples.push(sample),
            Err(reason) => match policy {
                MalformedPolicy::Fail => {
                    return Err(ParseError::MalformedSampleRecord {
                        source_name: source_name.to_string(),
                        line: line_number,
                        reason,
                    });
                }
                MalformedPolicy::Skip => {
                    warn!(
                        "Skipping malformed sample record at {}:{}: {}",
                        source_name, line_number, reason
                    );
                    trace.skipped += 1;
                }
            },
        }
    }

    debug!(
        "Read {} samples ({} malformed records skipped)",
        trace.samples.len(),
        trace.skipped
    );

    Ok(trace)
}

/// Parse one record according to the layout
///
/// **Public** - returns a human-readable reason on failure
pub fn parse_record(line: &str, layout: &SampleLayout) -> Result<Sample, String> {
    let (Some(task_end), Some(min_len)) = (layout.task_end(), layout.min_record_len()) else {
        return Err("task field end overflows".to_string());
    };
    if line.len() < min_len {
        return Err(format!(
            "record is {} bytes long, expected at least {}",
            line.len(),
            min_len
        ));
    }

    let address = line
        .get(layout.address_start..layout.address_end)
        .ok_or_else(|| "address field is not valid text".to_string())?
        .trim();

    if address.is_empty() {
        return Err("address field is empty".to_string());
    }
    if !address.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("address field '{}' is not hexadecimal", address));
    }

    let task = line
        .get(layout.task_offset..task_end)
        .ok_or_else(|| "task field is not valid text".to_string())?
        .trim();

    if task.is_empty() {
        return Err("task field is blank".to_string());
    }

    Ok(Sample::new(address, task))
}
