//! Simulation statistics collection and reporting.
//!
//! Tracks the three counters of a run. Counters only ever grow and are read
//! once replay has finished. `Display` renders the summary line
//! `hits:<n> misses:<n> evictions:<n>`.

use std::fmt;

use serde::Serialize;

use crate::cache::AccessOutcome;

/// Simulation statistics structure tracking hit, miss and eviction counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Single-line accesses that found their line resident.
    pub hits: u64,
    /// Single-line accesses that did not.
    pub misses: u64,
    /// Misses that had to replace a resident line.
    pub evictions: u64,
}

impl SimStats {
    /// Counts one single-line access.
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
            AccessOutcome::MissWithEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total single-line accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
