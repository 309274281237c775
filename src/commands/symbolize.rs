//! Symbolize command implementation.
//!
//! The symbolize command:
//! 1. Reads the sample trace
//! 2. Correlates samples against the disassembly listing
//! 3. Aggregates per-task frequency tables
//! 4. Prints the report
//! 5. Writes optional JSON / SVG outputs

use super::models::SymbolizeArgs;
use crate::aggregator::{aggregate, build_collapsed_stacks, SampleProfile};
use crate::correlator::correlate;
use crate::flamegraph::generate_flamegraph;
use crate::output::{print_report, to_report, write_report, write_svg};
use crate::parser::{read_samples, DisassemblyReader};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the symbolize command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The aggregated profile, after the report has been printed and any
/// requested files written
///
/// # Errors
/// * Unreadable input files
/// * Malformed sample records (under the fail policy)
/// * File write errors
pub fn execute_symbolize(args: SymbolizeArgs) -> Result<SampleProfile> {
    let start_time = Instant::now();

    info!("Symbolizing samples: {}", args.samples.display());
    info!("Disassembly: {}", args.disassembly.display());

    // Step 1: Read samples
    info!("Step 1/5: Reading sample trace...");
    let trace = read_samples(&args.samples, &args.layout, args.malformed)
        .context("Failed to read sample trace")?;

    if trace.skipped > 0 {
        warn!("Skipped {} malformed sample records", trace.skipped);
    }
    debug!("Loaded {} samples", trace.samples.len());

    // Step 2: Correlate against the listing
    info!("Step 2/5: Correlating samples with disassembly...");
    let reader =
        DisassemblyReader::open(&args.disassembly).context("Failed to open disassembly")?;
    let correlation = correlate(&trace.samples, reader, args.match_mode)
        .context("Failed to read disassembly")?;

    debug!(
        "Scanned {} listing lines, {} attributions",
        correlation.lines_scanned,
        correlation.attributions.len()
    );

    let stacks = if args.output_svg.is_some() {
        build_collapsed_stacks(&correlation.attributions)
    } else {
        Vec::new()
    };

    // Step 3: Aggregate
    info!("Step 3/5: Building frequency tables...");
    let profile = aggregate(&trace.samples, correlation, trace.skipped)
        .context("Failed to aggregate attributions")?;

    // Step 4: Report
    if args.print_report {
        info!("Step 4/5: Printing report...");
        print_report(&profile);
    } else {
        info!("Step 4/5: Skipping text report (not requested)");
    }

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");

    if let Some(json_path) = &args.output_json {
        let report = to_report(&profile, &args.disassembly, &args.samples, args.match_mode);
        write_report(&report, json_path).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    if let Some(svg_path) = &args.output_svg {
        if stacks.is_empty() {
            warn!("No samples were attributed, skipping flamegraph");
        } else {
            let svg = generate_flamegraph(&stacks, args.flamegraph_config.as_ref())
                .context("Failed to generate flamegraph")?;
            write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
            info!("✓ Flamegraph written to: {}", svg_path.display());
        }
    }

    let elapsed = start_time.elapsed();
    info!("Symbolization completed in {:.2}s", elapsed.as_secs_f64());

    Ok(profile)
}

/// Validate symbolize arguments
///
/// **Public** - can be called before execute_symbolize for early validation
pub fn validate_args(args: &SymbolizeArgs) -> Result<()> {
    if args.disassembly.as_os_str().is_empty() {
        anyhow::bail!("Disassembly path cannot be empty");
    }

    if args.samples.as_os_str().is_empty() {
        anyhow::bail!("Sample trace path cannot be empty");
    }

    if args.disassembly == args.samples {
        anyhow::bail!("Disassembly and sample trace must be different files");
    }

    if let Err(reason) = args.layout.check() {
        anyhow::bail!("Invalid sample record layout: {}", reason);
    }

    if let Some(config) = &args.flamegraph_config {
        if config.width == 0 {
            anyhow::bail!("Flamegraph width must be greater than 0");
        }
    }

    Ok(())
}
