//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that entered its set earliest, regardless of
//! how recently it was accessed. Each fill takes the next value of a clock
//! shared by all sets; hits leave the stamp untouched.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_insert()` / `on_hit()`: O(1)
//!   - `select_victim()`: O(K) where K is the associativity
//! - **Space Complexity:** O(1) beyond the per-line stamp
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::ReplacementPolicy;
use crate::cache::store::CacheLine;

/// FIFO Policy state.
#[derive(Debug, Clone, Default)]
pub struct FifoPolicy {
    /// Insertion clock; incremented before each stamp.
    clock: u64,
}

impl FifoPolicy {
    /// Creates a FIFO policy with its clock at zero.
    pub const fn new() -> Self {
        Self { clock: 0 }
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn on_insert(&mut self, line: &mut CacheLine) {
        self.clock += 1;
        line.order = self.clock;
    }

    /// Hits do not change insertion order.
    fn on_hit(&mut self, _line: &mut CacheLine) {}

    fn clock(&self) -> u64 {
        self.clock
    }
}
