//! Sample-to-disassembly correlation.
//!
//! The listing is walked once, in file order. Function headers update the
//! enclosing function before the line is matched, and each pending sample
//! whose address occurs in the line text is attributed to that line.
//!
//! Matching is a literal substring test by default. A short address can
//! therefore match inside a longer, unrelated hex value, in which case the
//! first such line in file order wins. [`MatchMode::Bounded`] rejects
//! occurrences that touch other alphanumeric characters.

use super::pending::PendingSamples;
use crate::parser::{DisassemblyLine, Sample, TaskId};
use crate::utils::config::{FUNCTION_HEADER_MARKER, UNRESOLVED_FUNCTION_LABEL};
use crate::utils::error::ParseError;
use log::{debug, warn};

/// How an address token is searched for in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchMode {
    /// Literal substring anywhere in the line
    #[default]
    Substring,
    /// Substring not adjacent to another alphanumeric character
    Bounded,
}

impl MatchMode {
    pub fn matches(self, text: &str, address: &str) -> bool {
        match self {
            MatchMode::Substring => text.contains(address),
            MatchMode::Bounded => text.match_indices(address).any(|(start, token)| {
                let before = text[..start].chars().next_back();
                let after = text[start + token.len()..].chars().next();
                !before.is_some_and(|c| c.is_ascii_alphanumeric())
                    && !after.is_some_and(|c| c.is_ascii_alphanumeric())
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Substring => "substring",
            MatchMode::Bounded => "bounded",
        }
    }
}

/// One sample resolved to a (function, instruction) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub task_id: TaskId,

    /// Address token of the sample
    pub address: String,

    /// Enclosing function header, `None` before the first header
    pub function: Option<String>,

    /// Mnemonic, or the header marker for lines without one
    pub instruction: String,

    /// Listing line the sample landed on
    pub line_number: usize,
}

impl Attribution {
    /// Function label used in frequency tables
    pub fn function_label(&self) -> &str {
        self.function.as_deref().unwrap_or(UNRESOLVED_FUNCTION_LABEL)
    }
}

/// Result of a full pass over the listing
#[derive(Debug, Clone, Default)]
pub struct Correlation {
    /// Attributions in listing order
    pub attributions: Vec<Attribution>,

    /// Samples no line matched
    pub unmatched: Vec<Sample>,

    /// Listing lines consumed
    pub lines_scanned: usize,
}

/// Streaming correlator state
///
/// Feed lines in file order with [`Correlator::observe`], then call
/// [`Correlator::finish`].
#[derive(Debug)]
pub struct Correlator {
    pending: PendingSamples,
    enclosing_function: Option<String>,
    mode: MatchMode,
    attributions: Vec<Attribution>,
    lines_scanned: usize,
}

impl Correlator {
    pub fn new(samples: &[Sample], mode: MatchMode) -> Self {
        Self {
            pending: PendingSamples::from_samples(samples),
            enclosing_function: None,
            mode,
            attributions: Vec::with_capacity(samples.len()),
            lines_scanned: 0,
        }
    }

    /// True once every sample has been attributed
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance over one listing line
    pub fn observe(&mut self, line: &DisassemblyLine) {
        self.lines_scanned += 1;

        if let Some(header) = &line.function {
            self.enclosing_function = Some(header.clone());
        }

        if self.pending.is_empty() {
            return;
        }

        let instruction = line.mnemonic.as_deref().unwrap_or(FUNCTION_HEADER_MARKER);

        for sample in self.pending.take_matches(&line.text, self.mode) {
            debug!(
                "Sample {} (task {}) -> line {}: {}",
                sample.address, sample.task_id, line.line_number, instruction
            );
            self.attributions.push(Attribution {
                task_id: sample.task_id,
                address: sample.address,
                function: self.enclosing_function.clone(),
                instruction: instruction.to_string(),
                line_number: line.line_number,
            });
        }
    }

    pub fn finish(self) -> Correlation {
        Correlation {
            attributions: self.attributions,
            unmatched: self.pending.into_unmatched(),
            lines_scanned: self.lines_scanned,
        }
    }
}

/// Correlate samples against a stream of listing lines
///
/// **Public** - main entry point for correlation
///
/// Stops reading the listing once every sample has been attributed.
///
/// # Errors
/// * `ParseError::Io` - The listing could not be read
pub fn correlate<I>(samples: &[Sample], lines: I, mode: MatchMode) -> Result<Correlation, ParseError>
where
    I: IntoIterator<Item = Result<DisassemblyLine, ParseError>>,
{
    debug!(
        "Correlating {} samples ({} match mode)",
        samples.len(),
        mode.as_str()
    );

    let mut correlator = Correlator::new(samples, mode);

    for line in lines {
        if correlator.is_done() {
            debug!("All samples attributed, stopping listing scan early");
            break;
        }
        correlator.observe(&line?);
    }

    let correlation = correlator.finish();

    if !correlation.unmatched.is_empty() {
        warn!(
            "{} of {} samples matched no disassembly line",
            correlation.unmatched.len(),
            samples.len()
        );
    }

    Ok(correlation)
}
