//! Error definitions.
//!
//! The cache model itself never fails: every 64-bit address is a valid input
//! once the geometry is validated. Errors therefore live at the edges:
//! 1. **Configuration:** Geometry and policy validation before a cache is built.
//! 2. **Trace records:** Why a single trace line was rejected (these are skipped, not fatal).
//! 3. **Runs:** File access and I/O failures that abort a simulation run.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use super::constants::POLICY_NAMES;

/// Invalid cache geometry or policy selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A geometry parameter was zero.
    #[error("{name} must be > 0")]
    Zero {
        /// Human-readable parameter name.
        name: &'static str,
    },

    /// Set count or block size is not a power of two.
    #[error("{name} must be a power of 2 (got {value})")]
    NotPowerOfTwo {
        /// Human-readable parameter name.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// No eviction policy was selected.
    #[error("eviction policy is required (one of {names})", names = POLICY_NAMES)]
    MissingPolicy,

    /// The policy name is not recognized.
    #[error("unknown eviction policy '{0}' (one of {names})", names = POLICY_NAMES)]
    UnknownPolicy(String),

    /// Set-index and block-offset fields do not fit in an address.
    #[error("set index and block offset need {0} address bits, more than 64")]
    AddressBits(u32),

    /// The total number of lines does not fit in memory.
    #[error("{sets} sets x {ways} lines is too large to allocate")]
    TooLarge {
        /// Requested number of sets.
        sets: usize,
        /// Requested lines per set.
        ways: usize,
    },
}

/// Reason a trace line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRecordError {
    /// The line is empty or whitespace only.
    #[error("empty line")]
    Empty,

    /// The first token is not one of `I`, `L`, `S`, `M`.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// No `address,length` operand follows the operation.
    #[error("missing operand")]
    MissingOperand,

    /// The operand has no comma separating address and length.
    #[error("missing ',' in operand '{0}'")]
    MissingComma(String),

    /// The address is not valid hexadecimal.
    #[error("bad address '{text}': {source}")]
    Address {
        /// The offending text.
        text: String,
        /// Underlying integer parse error.
        source: ParseIntError,
    },

    /// The length is not a valid decimal integer.
    #[error("bad length '{text}': {source}")]
    Length {
        /// The offending text.
        text: String,
        /// Underlying integer parse error.
        source: ParseIntError,
    },
}

/// Fatal error for a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Geometry or policy validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A trace or configuration file could not be opened.
    #[error("{}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading the trace failed part way through.
    #[error("failed to read trace: {0}")]
    Read(#[from] io::Error),

    /// A configuration file is not valid JSON for [`crate::config::CacheConfig`].
    #[error("{}: invalid configuration: {source}", path.display())]
    ConfigFile {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
