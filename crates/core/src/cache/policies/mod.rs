//! Cache Replacement Policies.
//!
//! Each policy stamps lines with values of a run-wide logical clock and the
//! victim is the line with the oldest stamp in its set. The policies differ
//! only in which events advance a line's stamp.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out. Stamped on insertion only.
//! - `Lru`: Least Recently Used. Stamped on insertion and on every hit.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

use std::fmt;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::store::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating line order metadata and selecting
/// victim lines. The policy owns its clock; the engine owns the lines.
pub trait ReplacementPolicy: fmt::Debug {
    /// Updates order metadata for a line that was just filled (cold fill or
    /// refill of a victim).
    fn on_insert(&mut self, line: &mut CacheLine);

    /// Updates order metadata for a line that was just hit.
    fn on_hit(&mut self, line: &mut CacheLine);

    /// Selects the slot to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - All `K` lines of the target set, in slot order.
    ///
    /// # Returns
    ///
    /// The slot index of the victim.
    fn select_victim(&self, set: &[CacheLine]) -> usize {
        oldest_slot(set)
    }

    /// Current value of the policy clock.
    fn clock(&self) -> u64;
}

/// Slot with the strictly smallest `order`; the lowest slot wins ties.
///
/// Returns 0 for an empty slice.
pub fn oldest_slot(set: &[CacheLine]) -> usize {
    let mut victim = 0;
    for (slot, line) in set.iter().enumerate().skip(1) {
        if line.order < set[victim].order {
            victim = slot;
        }
    }
    victim
}

/// Builds the policy implementation for a configuration selector.
pub fn build(kind: PolicyType) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Fifo => Box::new(FifoPolicy::new()),
        PolicyType::Lru => Box::new(LruPolicy::new()),
    }
}
