//! Simulator: one trace replay run.
//!
//! Owns the cache (and through it the policy clock and counters) for the
//! lifetime of a run. Nothing is shared between runs.

use std::io::BufRead;
use std::path::Path;

use super::trace::{self, TraceReader, TraceRecord};
use crate::cache::{AccessOutcome, CacheSim};
use crate::common::{ConfigError, SimError};
use crate::config::CacheConfig;
use crate::stats::SimStats;

/// Top-level simulation run: cache state plus replay bookkeeping.
#[derive(Debug)]
pub struct Simulator {
    /// Cache under simulation.
    cache: CacheSim,
    /// Outcomes of the most recent record, reused between records.
    outcomes: Vec<AccessOutcome>,
    /// Records that reached the cache (instruction fetches excluded).
    records: u64,
}

impl Simulator {
    /// Validates the configuration and allocates the cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry or policy is invalid or the
    /// cache is too large to allocate.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let (geometry, policy) = config.validate()?;
        Ok(Self::from_cache(CacheSim::new(geometry, policy)?))
    }

    /// Wraps an already constructed cache.
    pub const fn from_cache(cache: CacheSim) -> Self {
        Self {
            cache,
            outcomes: Vec::new(),
            records: 0,
        }
    }

    /// Replays one record.
    ///
    /// Splits the access at line boundaries and issues one cache access per
    /// touched line (two for `M`). Instruction fetches are ignored.
    ///
    /// # Returns
    ///
    /// The outcomes of the issued accesses, in order.
    pub fn replay_record(&mut self, record: &TraceRecord) -> &[AccessOutcome] {
        self.outcomes.clear();
        let repeats = record.op.accesses_per_line();
        if repeats == 0 {
            return &self.outcomes;
        }
        self.records += 1;

        let geometry = *self.cache.geometry();
        for addr in geometry.line_addresses(record.address, record.len) {
            for _ in 0..repeats {
                let outcome = self.cache.access_line(addr);
                self.outcomes.push(outcome);
            }
        }
        &self.outcomes
    }

    /// Replays every record of a trace in order.
    ///
    /// # Arguments
    ///
    /// * `trace` - Source of records; malformed lines are skipped by the reader.
    /// * `observer` - Called after each record with the outcomes it produced.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Read`] if reading the trace fails.
    pub fn run<R, F>(
        &mut self,
        trace: &mut TraceReader<R>,
        mut observer: F,
    ) -> Result<SimStats, SimError>
    where
        R: BufRead,
        F: FnMut(&TraceRecord, &[AccessOutcome]),
    {
        let geometry = self.cache.geometry();
        tracing::info!(
            sets = geometry.sets(),
            ways = geometry.ways(),
            line_bytes = geometry.line_bytes(),
            tag_bits = geometry.tag_bits(),
            "replaying trace"
        );

        for record in trace.by_ref() {
            let record = record?;
            let outcomes = self.replay_record(&record);
            observer(&record, outcomes);
        }

        let stats = *self.stats();
        tracing::info!(
            records = self.records,
            skipped = trace.skipped(),
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            hit_rate = stats.hit_rate(),
            "replay finished"
        );
        Ok(stats)
    }

    /// Opens a trace file and replays it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Open`] if the file cannot be opened and
    /// [`SimError::Read`] if reading it fails.
    pub fn run_file<F>(
        &mut self,
        path: impl AsRef<Path>,
        observer: F,
    ) -> Result<SimStats, SimError>
    where
        F: FnMut(&TraceRecord, &[AccessOutcome]),
    {
        let mut reader = trace::open_trace(path)?;
        self.run(&mut reader, observer)
    }

    /// Accesses a single line directly, bypassing trace replay.
    pub fn access_line(&mut self, addr: u64) -> AccessOutcome {
        self.cache.access_line(addr)
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        self.cache.stats()
    }

    /// Cache under simulation.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Number of data records replayed.
    pub const fn records(&self) -> u64 {
        self.records
    }
}
