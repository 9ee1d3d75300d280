//! Memory trace records and reader.
//!
//! A trace line has the form `[ ]<op> <hex address>,<decimal length>`, where
//! `<op>` is one of:
//! - `I`: instruction fetch (parsed, never simulated),
//! - `L`: data load,
//! - `S`: data store,
//! - `M`: data modify (a load followed by a store to the same address).
//!
//! Lines that do not match are skipped rather than treated as errors.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::common::{ParseRecordError, SimError};

/// Memory operation kind of a trace record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Instruction fetch (`I`).
    Instruction,
    /// Data load (`L`).
    Load,
    /// Data store (`S`).
    Store,
    /// Data modify (`M`).
    Modify,
}

impl Operation {
    /// Parses a single-character operation code.
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'I' => Some(Self::Instruction),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Trace operation code.
    pub const fn code(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// How many times each touched line is accessed; 0 for operations the
    /// data cache does not see.
    pub const fn accesses_per_line(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One parsed trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Operation kind.
    pub op: Operation,
    /// First byte accessed.
    pub address: u64,
    /// Number of bytes accessed.
    pub len: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(op: Operation, address: u64, len: u64) -> Self {
        Self { op, address, len }
    }
}

impl FromStr for TraceRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut chars = line.chars();
        let code = chars.next().ok_or(ParseRecordError::Empty)?;
        let op = Operation::from_code(code)
            .ok_or_else(|| ParseRecordError::UnknownOperation(code.to_string()))?;

        let operand = chars.as_str().trim_start();
        if operand.is_empty() {
            return Err(ParseRecordError::MissingOperand);
        }
        let (addr_text, len_text) = operand
            .split_once(',')
            .ok_or_else(|| ParseRecordError::MissingComma(operand.to_owned()))?;

        let addr_text = addr_text.trim();
        let hex = addr_text
            .strip_prefix("0x")
            .or_else(|| addr_text.strip_prefix("0X"))
            .unwrap_or(addr_text);
        let address =
            u64::from_str_radix(hex, 16).map_err(|source| ParseRecordError::Address {
                text: addr_text.to_owned(),
                source,
            })?;

        // Anything after the length (e.g. annotations) is ignored.
        let len_text = len_text.split_whitespace().next().unwrap_or_default();
        let len = len_text
            .parse::<u64>()
            .map_err(|source| ParseRecordError::Length {
                text: len_text.to_owned(),
                source,
            })?;

        Ok(Self { op, address, len })
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op, self.address, self.len)
    }
}

/// Iterator over the well-formed records of a trace.
///
/// Yields `Err` only for I/O failures; malformed lines are counted and
/// skipped.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: u64,
    skipped: u64,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines read so far.
    pub const fn lines_read(&self) -> u64 {
        self.line_no
    }

    /// Lines skipped so far because they did not parse.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = io::Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line_no += 1;

            match String::from_utf8_lossy(&self.buf).parse::<TraceRecord>() {
                Ok(record) => return Some(Ok(record)),
                Err(reason) => {
                    self.skipped += 1;
                    tracing::trace!(line = self.line_no, %reason, "skipping trace line");
                }
            }
        }
    }
}

/// Opens a trace file for reading.
///
/// # Errors
///
/// Returns [`SimError::Open`] if the file cannot be opened.
pub fn open_trace(path: impl AsRef<Path>) -> Result<TraceReader<BufReader<File>>, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SimError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TraceReader::new(BufReader::new(file)))
}
