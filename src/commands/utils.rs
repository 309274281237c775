use crate::output::{format_frequency, read_report};
use crate::utils::config::{
    REPORT_SCHEMA_VERSION, SAMPLE_ADDRESS_END, SAMPLE_ADDRESS_START, SAMPLE_RECORD_FORMAT_VERSION,
    SAMPLE_TASK_OFFSET, SAMPLE_TASK_WIDTH,
};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a JSON report file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Disassembly: {}", report.disassembly);
    println!("  Samples: {}", report.samples_file);
    println!("  Match Mode: {}", report.match_mode);
    println!("  Total Samples: {}", report.total_samples);
    println!("  Matched: {}", report.matched_samples);
    println!("  Unmatched: {}", report.unmatched_samples);
    println!("  Tasks: {}", report.tasks.len());

    for task in &report.tasks {
        if let Some(top) = task.functions.first() {
            println!(
                "    task {}: hottest {} ({})",
                task.task_id,
                top.label,
                format_frequency(top.frequency)
            );
        }
    }

    Ok(())
}

/// Display sample record and report format information
pub fn display_format(show_details: bool) {
    println!("IP Symbolizer Formats");
    println!("Sample Record Format: v{}", SAMPLE_RECORD_FORMAT_VERSION);
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Sample Record (one per line, byte offsets, half-open):");
        println!(
            "  {:>2}..{:<2}  address   - hex instruction pointer (space padding allowed)",
            SAMPLE_ADDRESS_START, SAMPLE_ADDRESS_END
        );
        println!(
            "  {:>2}..{:<2}  task      - task identifier",
            SAMPLE_TASK_OFFSET,
            SAMPLE_TASK_OFFSET + SAMPLE_TASK_WIDTH
        );
        println!("  other bytes are ignored, blank lines are skipped");
        println!();
        println!("Report Structure:");
        println!("  version: string            - Schema version");
        println!("  disassembly: string        - Listing path");
        println!("  samples_file: string       - Trace path");
        println!("  match_mode: string         - substring | bounded");
        println!("  total_samples: number      - Samples loaded (frequency denominator)");
        println!("  matched_samples: number    - Samples attributed");
        println!("  unmatched_samples: number  - Samples no line matched");
        println!("  skipped_records: number    - Malformed records skipped");
        println!("  tasks: array               - Per-task frequency tables");
        println!("    task_id: string");
        println!("    matched_samples: number");
        println!("    functions: array         - {{label, count, frequency}}");
        println!("    instructions: array      - {{label, count, frequency}}");
        println!("  unmatched: array           - {{address, task_id}}");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed format information");
    }
}

/// Display version information
pub fn display_version() {
    println!("IP Symbolizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Sample Record Format: v{}", SAMPLE_RECORD_FORMAT_VERSION);
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Attributes sampled instruction pointers to functions and instructions.");
}
