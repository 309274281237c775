//! IP Symbolizer CLI
//!
//! Attributes sampled instruction pointers to the functions and
//! instructions of a disassembly listing and reports per-task frequencies.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ip_symbolizer::commands::{
    display_format, display_version, execute_symbolize, validate_args, validate_report_file,
    SymbolizeArgs,
};
use ip_symbolizer::correlator::MatchMode;
use ip_symbolizer::flamegraph::FlamegraphConfig;
use ip_symbolizer::parser::{MalformedPolicy, SampleLayout};
use ip_symbolizer::utils::config::{
    DEFAULT_FLAMEGRAPH_WIDTH, SAMPLE_ADDRESS_END, SAMPLE_ADDRESS_START, SAMPLE_TASK_OFFSET,
    SAMPLE_TASK_WIDTH,
};

/// IP Symbolizer - attribute profiler samples to a disassembly
#[derive(Parser, Debug)]
#[command(name = "ip-symbolize")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Attribute a sample trace to a disassembly listing
    Symbolize {
        /// Disassembly listing of the profiled binary
        #[arg(short, long)]
        disassembly: PathBuf,

        /// Sample trace written by the profiler
        #[arg(short, long)]
        samples: PathBuf,

        /// How sample addresses are matched against listing lines
        #[arg(long, value_enum, default_value_t = MatchMode::Substring)]
        match_mode: MatchMode,

        /// What to do with malformed sample records
        #[arg(long, value_enum, default_value_t = MalformedPolicy::Fail)]
        malformed: MalformedPolicy,

        /// First byte of the address field in a sample record
        #[arg(long, default_value_t = SAMPLE_ADDRESS_START)]
        address_start: usize,

        /// End (exclusive) of the address field in a sample record
        #[arg(long, default_value_t = SAMPLE_ADDRESS_END)]
        address_end: usize,

        /// Byte offset of the task identifier in a sample record
        #[arg(long, default_value_t = SAMPLE_TASK_OFFSET)]
        task_offset: usize,

        /// Width of the task identifier field
        #[arg(long, default_value_t = SAMPLE_TASK_WIDTH)]
        task_width: usize,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = DEFAULT_FLAMEGRAPH_WIDTH)]
        width: usize,

        /// Do not print the text report
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a JSON report file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display sample record and report format information
    Format {
        /// Show full format details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Symbolize {
            disassembly,
            samples,
            match_mode,
            malformed,
            address_start,
            address_end,
            task_offset,
            task_width,
            output,
            flamegraph,
            title,
            width,
            quiet,
        } => {
            // Create flamegraph config
            let flamegraph_config = flamegraph.as_ref().map(|_| {
                let config = FlamegraphConfig::new().with_width(width);
                match title {
                    Some(title) => config.with_title(title),
                    None => config,
                }
            });

            let args = SymbolizeArgs {
                disassembly,
                samples,
                layout: SampleLayout {
                    address_start,
                    address_end,
                    task_offset,
                    task_width,
                },
                malformed,
                match_mode,
                output_json: output,
                output_svg: flamegraph,
                flamegraph_config,
                print_report: !quiet,
            };

            // Validate args first
            validate_args(&args)?;

            execute_symbolize(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Format { show } => {
            display_format(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
