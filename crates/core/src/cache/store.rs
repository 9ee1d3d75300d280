//! Cache line storage.
//!
//! All `S * K` lines live in one flat vector; set `s` occupies the slots
//! `s * K .. (s + 1) * K`. A slot index only identifies a line within its set,
//! it carries no address information.

use super::geometry::CacheGeometry;
use crate::common::ConfigError;

/// Cache line entry containing tag, validity, and the policy order stamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Upper address bits identifying the block held by this line.
    pub tag: u64,
    /// `false` while the slot has never been filled.
    pub valid: bool,
    /// Policy clock value from the last insertion (FIFO) or insertion/hit (LRU).
    pub order: u64,
}

/// Fixed-geometry collection of sets and lines.
#[derive(Debug, Clone)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
    geometry: CacheGeometry,
}

impl CacheStore {
    /// Allocates every line as invalid with tag 0 and order 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TooLarge`] if the lines cannot be allocated.
    pub fn new(geometry: CacheGeometry) -> Result<Self, ConfigError> {
        let num_lines = geometry.num_lines();
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(num_lines)
            .map_err(|_| ConfigError::TooLarge {
                sets: geometry.sets(),
                ways: geometry.ways(),
            })?;
        lines.resize(num_lines, CacheLine::default());
        Ok(Self { lines, geometry })
    }

    /// Geometry this store was built with.
    #[inline]
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Splits an address into `(set_index, tag)`.
    #[inline]
    pub fn decompose(&self, addr: u64) -> (usize, u64) {
        self.geometry.decompose(addr)
    }

    /// Lines of one set in slot order.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= S`. Indices produced by [`Self::decompose`]
    /// are always in range.
    #[inline]
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.geometry.ways();
        &self.lines[base..base + self.geometry.ways()]
    }

    /// Mutable lines of one set in slot order.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= S`.
    #[inline]
    pub fn set_mut(&mut self, set_index: usize) -> &mut [CacheLine] {
        let ways = self.geometry.ways();
        let base = set_index * ways;
        &mut self.lines[base..base + ways]
    }

    /// Slot of the valid line holding `tag` in the given set, if any.
    pub fn lookup(&self, set_index: usize, tag: u64) -> Option<usize> {
        self.set(set_index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Lowest-index invalid slot in the given set, if any.
    pub fn find_free_slot(&self, set_index: usize) -> Option<usize> {
        self.set(set_index).iter().position(|line| !line.valid)
    }

    /// Number of valid lines in the given set.
    pub fn occupancy(&self, set_index: usize) -> usize {
        self.set(set_index).iter().filter(|line| line.valid).count()
    }

    /// Returns `true` if the line holding `addr` is resident.
    pub fn contains(&self, addr: u64) -> bool {
        let (set_index, tag) = self.decompose(addr);
        self.lookup(set_index, tag).is_some()
    }
}
