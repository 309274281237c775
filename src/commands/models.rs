use crate::correlator::MatchMode;
use crate::flamegraph::FlamegraphConfig;
use crate::parser::{MalformedPolicy, SampleLayout};
use std::path::PathBuf;

/// Arguments for the symbolize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SymbolizeArgs {
    /// Disassembly listing of the profiled binary
    pub disassembly: PathBuf,

    /// Sample trace written by the profiler
    pub samples: PathBuf,

    /// Byte layout of a sample record
    pub layout: SampleLayout,

    /// What to do with malformed sample records
    pub malformed: MalformedPolicy,

    /// Address matching mode
    pub match_mode: MatchMode,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    /// Print the text report to stdout
    pub print_report: bool,
}

impl Default for SymbolizeArgs {
    fn default() -> Self {
        Self {
            disassembly: PathBuf::from("disassembly.txt"),
            samples: PathBuf::from("samples.txt"),
            layout: SampleLayout::default(),
            malformed: MalformedPolicy::default(),
            match_mode: MatchMode::default(),
            output_json: None,
            output_svg: None,
            flamegraph_config: None,
            print_report: true,
        }
    }
}
