//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been touched for the longest
//! time. Every fill and every hit stamps the line with the next value of a
//! clock shared by all sets, so the smallest stamp in a set marks the least
//! recently used line.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_insert()` / `on_hit()`: O(1)
//!   - `select_victim()`: O(K) where K is the associativity
//! - **Space Complexity:** O(1) beyond the per-line stamp
//! - **Best Case:** Working sets with good temporal locality
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::ReplacementPolicy;
use crate::cache::store::CacheLine;

/// LRU Policy state.
#[derive(Debug, Clone, Default)]
pub struct LruPolicy {
    /// Use clock; incremented before each stamp.
    clock: u64,
}

impl LruPolicy {
    /// Creates an LRU policy with its clock at zero.
    pub const fn new() -> Self {
        Self { clock: 0 }
    }

    fn stamp(&mut self, line: &mut CacheLine) {
        self.clock += 1;
        line.order = self.clock;
    }
}

impl ReplacementPolicy for LruPolicy {
    fn on_insert(&mut self, line: &mut CacheLine) {
        self.stamp(line);
    }

    /// Moves the line to the most-recently-used position.
    fn on_hit(&mut self, line: &mut CacheLine) {
        self.stamp(line);
    }

    fn clock(&self) -> u64 {
        self.clock
    }
}
