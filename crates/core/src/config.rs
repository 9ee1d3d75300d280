//! Configuration for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run:
//! 1. **Structure:** `CacheConfig` holding set count, associativity, line size and policy.
//! 2. **Enums:** The replacement policy selector.
//! 3. **Validation:** Conversion of a raw configuration into a checked `CacheGeometry`.
//!
//! Configuration is supplied on the command line or as a JSON file; every field
//! is optional in JSON so a file may provide a partial base that flags override.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::CacheGeometry;
use crate::common::{ConfigError, SimError};

/// Cache replacement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementPolicy {
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was inserted into the set earliest; hits do not
    /// refresh a line's position.
    #[serde(rename = "FIFO", alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last insertion or hit is oldest.
    #[serde(rename = "LRU", alias = "Lru", alias = "lru")]
    Lru,
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => f.write_str("FIFO"),
            Self::Lru => f.write_str("LRU"),
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("fifo") {
            Ok(Self::Fifo)
        } else if s.eq_ignore_ascii_case("lru") {
            Ok(Self::Lru)
        } else {
            Err(ConfigError::UnknownPolicy(s.to_owned()))
        }
    }
}

/// Cache geometry and policy selection.
///
/// A zero or missing value means "not specified"; [`CacheConfig::validate`]
/// rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Number of sets (`S`), a power of two.
    pub sets: usize,
    /// Lines per set (`K`), the associativity.
    pub ways: usize,
    /// Bytes per line (`B`), a power of two.
    pub line_bytes: usize,
    /// Eviction policy.
    pub policy: Option<ReplacementPolicy>,
}

impl CacheConfig {
    /// Creates a fully specified configuration.
    pub const fn new(
        sets: usize,
        ways: usize,
        line_bytes: usize,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            sets,
            ways,
            line_bytes,
            policy: Some(policy),
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Open`] if the file cannot be opened and
    /// [`SimError::ConfigFile`] if its contents are not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SimError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| SimError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the configuration and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any geometry parameter is zero, if the set
    /// count or line size is not a power of two, if the address fields exceed
    /// 64 bits, or if no policy is selected.
    pub fn validate(&self) -> Result<(CacheGeometry, ReplacementPolicy), ConfigError> {
        let geometry = CacheGeometry::new(self.sets, self.ways, self.line_bytes)?;
        let policy = self.policy.ok_or(ConfigError::MissingPolicy)?;
        Ok((geometry, policy))
    }
}
