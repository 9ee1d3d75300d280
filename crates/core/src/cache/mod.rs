//! Set-Associative Cache Simulator.
//!
//! This module implements the cache model: a fixed geometry of sets and
//! lines, address decomposition, associative lookup, and the eviction engine
//! that classifies each single-line access as a hit, a miss, or a miss with
//! eviction. Replacement decisions are delegated to a [`ReplacementPolicy`].

/// Geometry validation and address decomposition.
pub mod geometry;

/// Cache replacement policy implementations (FIFO, LRU).
pub mod policies;

/// Flat line storage and per-set lookup.
pub mod store;

use std::fmt;

pub use self::geometry::{CacheGeometry, LineAddresses};
use self::policies::ReplacementPolicy;
pub use self::store::{CacheLine, CacheStore};
use crate::common::ConfigError;
use crate::config::ReplacementPolicy as PolicyType;
use crate::stats::SimStats;

/// Result of one single-line access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The line was resident.
    Hit,
    /// The line was absent and filled into a free slot.
    Miss,
    /// The line was absent and replaced a victim in a full set.
    MissWithEviction,
}

impl AccessOutcome {
    /// Returns `true` if a resident line was evicted.
    pub const fn evicted(self) -> bool {
        matches!(self, Self::MissWithEviction)
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::MissWithEviction => "MISS+EVICTION",
        })
    }
}

/// Cache simulator implementing a set-associative cache with a pluggable
/// replacement policy.
///
/// Owns the line store, the policy (and with it the policy clock) and the
/// hit/miss/eviction counters of one run.
#[derive(Debug)]
pub struct CacheSim {
    store: CacheStore,
    policy: Box<dyn ReplacementPolicy>,
    stats: SimStats,
}

impl CacheSim {
    /// Creates a cache with every line invalid.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated cache shape.
    /// * `policy` - Replacement policy, selected once for the lifetime of the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooLarge`] if the line store cannot be allocated.
    pub fn new(geometry: CacheGeometry, policy: PolicyType) -> Result<Self, ConfigError> {
        Self::with_policy(geometry, policies::build(policy))
    }

    /// Creates a cache driven by a caller-supplied policy implementation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooLarge`] if the line store cannot be allocated.
    pub fn with_policy(
        geometry: CacheGeometry,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            store: CacheStore::new(geometry)?,
            policy,
            stats: SimStats::default(),
        })
    }

    /// Accesses the line containing `addr`.
    ///
    /// On a hit the policy is notified and no line changes owner. On a miss
    /// the line is filled into the lowest free slot of its set or, when the
    /// set is full, replaces the victim chosen by the policy.
    pub fn access_line(&mut self, addr: u64) -> AccessOutcome {
        let (set_index, tag) = self.store.decompose(addr);

        if let Some(slot) = self.store.lookup(set_index, tag) {
            self.policy.on_hit(&mut self.store.set_mut(set_index)[slot]);
            self.stats.record(AccessOutcome::Hit);
            return AccessOutcome::Hit;
        }

        let outcome = if let Some(slot) = self.store.find_free_slot(set_index) {
            let line = &mut self.store.set_mut(set_index)[slot];
            line.tag = tag;
            line.valid = true;
            self.policy.on_insert(line);
            AccessOutcome::Miss
        } else {
            let victim = self.policy.select_victim(self.store.set(set_index));
            let line = &mut self.store.set_mut(set_index)[victim];
            tracing::debug!(
                set = set_index,
                slot = victim,
                evicted_tag = line.tag,
                tag,
                "eviction"
            );
            line.tag = tag;
            self.policy.on_insert(line);
            AccessOutcome::MissWithEviction
        };

        self.stats.record(outcome);
        outcome
    }

    /// Returns `true` if the line holding `addr` is resident. Does not
    /// touch policy state or counters.
    pub fn contains(&self, addr: u64) -> bool {
        self.store.contains(addr)
    }

    /// Cache shape.
    pub const fn geometry(&self) -> &CacheGeometry {
        self.store.geometry()
    }

    /// Line storage, for inspection.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Current policy clock value.
    pub fn policy_clock(&self) -> u64 {
        self.policy.clock()
    }
}
