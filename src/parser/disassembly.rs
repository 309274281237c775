//! Disassembly listing reader.
//!
//! Streams the text output of an external disassembler line by line and
//! classifies each line. Tracking the current function is left to the
//! correlator, which has to advance it in lockstep with matching.

use crate::utils::error::ParseError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// `<symbol>:` label announcing a new function
static FUNCTION_HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*>:").unwrap());

/// Leading `address:` column of an instruction line
static ADDRESS_FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9A-Fa-f]+:").unwrap());

/// Mnemonic separated from the preceding column by at least two blanks
static MNEMONIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}([a-z]+)").unwrap());

/// How a line takes part in correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    FunctionHeader,
    Instruction,
    Other,
}

/// One classified line of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassemblyLine {
    /// 1-based line number in the listing
    pub line_number: usize,

    /// Raw line text
    pub text: String,

    /// Header text (e.g. `<foo>:`) if the line opens a function
    pub function: Option<String>,

    /// First mnemonic after the address field
    pub mnemonic: Option<String>,
}

impl DisassemblyLine {
    /// Classify a raw line
    pub fn parse(line_number: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let function = extract_function_header(&text).map(str::to_string);
        let mnemonic = extract_mnemonic(&text).map(str::to_string);

        Self {
            line_number,
            text,
            function,
            mnemonic,
        }
    }

    /// A line with a mnemonic is an instruction even if it also opens a function
    pub fn kind(&self) -> LineKind {
        if self.mnemonic.is_some() {
            LineKind::Instruction
        } else if self.function.is_some() {
            LineKind::FunctionHeader
        } else {
            LineKind::Other
        }
    }
}

/// Matched `<…>:` text of a function header line
pub fn extract_function_header(line: &str) -> Option<&str> {
    FUNCTION_HEADER_RE.find(line).map(|m| m.as_str())
}

/// Mnemonic of an instruction line, searched after the address column
///
/// Lines without a leading `address:` field have no mnemonic.
pub fn extract_mnemonic(line: &str) -> Option<&str> {
    let address = ADDRESS_FIELD_RE.find(line)?;
    let rest = &line[address.end()..];

    MNEMONIC_RE
        .captures(rest)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Lazy, file-ordered stream of classified disassembly lines
///
/// The underlying handle is released when the reader is dropped.
pub struct DisassemblyReader<R> {
    lines: Lines<R>,
    source_name: String,
    line_number: usize,
}

impl DisassemblyReader<BufReader<File>> {
    /// Open a disassembly listing on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        debug!("Opening disassembly: {}", source_name);

        let file = File::open(path).map_err(|error| ParseError::Io {
            source_name: source_name.clone(),
            error,
        })?;

        Ok(Self::new(BufReader::new(file), source_name))
    }
}

impl<R: BufRead> DisassemblyReader<R> {
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            source_name: source_name.into(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for DisassemblyReader<R> {
    type Item = Result<DisassemblyLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;

        Some(
            line.map(|text| DisassemblyLine::parse(self.line_number, text))
                .map_err(|error| ParseError::Io {
                    source_name: self.source_name.clone(),
                    error,
                }),
        )
    }
}
