//! IP Symbolizer
//!
//! Post-hoc symbolication for a statistical instruction-pointer profiler.
//! Given a trace of sampled addresses tagged with a task identifier and a
//! textual disassembly of the profiled binary, every sample is attributed
//! to its enclosing function and instruction, and per-task frequency
//! tables are reported.
//!
//! ## Pipeline
//!
//! ```text
//! parser::samples ─┐
//!                  ├─> correlator ─> aggregator ─> output
//! parser::disassembly ┘
//! ```
//!
//! Most users should use the CLI:
//!
//! ```bash
//! ip-symbolize symbolize --disassembly kernel.asm --samples samples.txt
//! ```

pub mod aggregator;
pub mod commands;
pub mod correlator;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
