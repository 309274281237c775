//! JSON report output writer.
//!
//! Converts a [`SampleProfile`] into the versioned [`SymbolizedReport`]
//! schema and writes it with proper formatting.

use crate::aggregator::SampleProfile;
use crate::correlator::MatchMode;
use crate::parser::schema::{SymbolizedReport, TaskReport, UnmatchedEntry};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Convert a profile to the output schema
///
/// **Public** - used by commands to create final output
pub fn to_report(
    profile: &SampleProfile,
    disassembly: &Path,
    samples_file: &Path,
    match_mode: MatchMode,
) -> SymbolizedReport {
    let tasks = profile
        .tasks
        .iter()
        .map(|(task_id, histogram)| TaskReport {
            task_id: task_id.clone(),
            matched_samples: histogram.matched(),
            functions: histogram.functions.ranked(profile.total_samples),
            instructions: histogram.instructions.ranked(profile.total_samples),
        })
        .collect();

    let unmatched = profile
        .unmatched
        .iter()
        .map(|sample| UnmatchedEntry {
            address: sample.address.clone(),
            task_id: sample.task_id.clone(),
        })
        .collect();

    SymbolizedReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        disassembly: disassembly.display().to_string(),
        samples_file: samples_file.display().to_string(),
        match_mode: match_mode.as_str().to_string(),
        total_samples: profile.total_samples,
        matched_samples: profile.matched_samples,
        unmatched_samples: profile.unmatched_samples(),
        skipped_records: profile.skipped_records,
        tasks,
        unmatched,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &SymbolizedReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<SymbolizedReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: SymbolizedReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} tasks",
        report.version,
        report.tasks.len()
    );

    Ok(report)
}

/// Validate that output path is writable
///
/// **Private** - shared with the SVG writer
pub(crate) fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories if needed
///
/// **Private** - shared with the SVG writer
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Aggregator;
    use crate::correlator::Attribution;
    use crate::parser::{Sample, TaskId};
    use tempfile::NamedTempFile;

    fn create_test_profile() -> SampleProfile {
        let samples = vec![Sample::new("deadbeef", "1"), Sample::new("cafe", "1")];
        let mut aggregator = Aggregator::new(&samples);
        aggregator
            .record(&Attribution {
                task_id: TaskId::new("1"),
                address: "deadbeef".to_string(),
                function: Some("<foo>:".to_string()),
                instruction: "mov".to_string(),
                line_number: 2,
            })
            .unwrap();
        aggregator.finish(vec![samples[1].clone()], 0)
    }

    #[test]
    fn test_to_report() {
        let report = to_report(
            &create_test_profile(),
            Path::new("kernel.asm"),
            Path::new("samples.txt"),
            MatchMode::Substring,
        );

        assert_eq!(report.version, REPORT_SCHEMA_VERSION);
        assert_eq!(report.match_mode, "substring");
        assert_eq!(report.total_samples, 2);
        assert_eq!(report.matched_samples, 1);
        assert_eq!(report.unmatched_samples, 1);
        assert_eq!(report.tasks[0].functions[0].label, "<foo>:");
        assert_eq!(report.tasks[0].functions[0].frequency, 0.5);
        assert_eq!(report.unmatched[0].address, "cafe");
    }

    #[test]
    fn test_write_and_read_report() {
        let report = to_report(
            &create_test_profile(),
            Path::new("kernel.asm"),
            Path::new("samples.txt"),
            MatchMode::Bounded,
        );
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();
        let loaded = read_report(temp_file.path()).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.match_mode, "bounded");
        assert_eq!(loaded.tasks[0].instructions, report.tasks[0].instructions);
        assert_eq!(loaded.unmatched, report.unmatched);
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");
        let report = to_report(
            &create_test_profile(),
            Path::new("a"),
            Path::new("b"),
            MatchMode::Substring,
        );

        write_report(&report, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
