//! Cache geometry and address decomposition.
//!
//! An address is split, from most to least significant bits, into
//! `tag | set index | block offset`. The set index has `log2(S)` bits and the
//! block offset `log2(B)` bits; the tag is everything above them.

use super::store::CacheLine;
use crate::common::{ADDRESS_BITS, ConfigError};

/// Validated, immutable cache shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    sets: usize,
    ways: usize,
    line_bytes: u64,
    set_bits: u32,
    offset_bits: u32,
}

impl CacheGeometry {
    /// Validates a geometry.
    ///
    /// # Arguments
    ///
    /// * `sets` - Number of sets (`S`), a power of two.
    /// * `ways` - Lines per set (`K`).
    /// * `line_bytes` - Bytes per line (`B`), a power of two.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a parameter is zero, `S` or `B` is not
    /// a power of two, the index and offset fields need more than 64 bits, or
    /// the `S * K` lines cannot be addressed as one allocation.
    pub fn new(sets: usize, ways: usize, line_bytes: usize) -> Result<Self, ConfigError> {
        if sets == 0 {
            return Err(ConfigError::Zero { name: "S" });
        }
        if ways == 0 {
            return Err(ConfigError::Zero { name: "K" });
        }
        if line_bytes == 0 {
            return Err(ConfigError::Zero { name: "B" });
        }
        if !sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                name: "S",
                value: sets,
            });
        }
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                name: "B",
                value: line_bytes,
            });
        }

        let set_bits = sets.trailing_zeros();
        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = set_bits + offset_bits;
        if index_bits > ADDRESS_BITS {
            return Err(ConfigError::AddressBits(index_bits));
        }
        let fits = sets
            .checked_mul(ways)
            .and_then(|lines| lines.checked_mul(size_of::<CacheLine>()))
            .is_some_and(|bytes| isize::try_from(bytes).is_ok());
        if !fits {
            return Err(ConfigError::TooLarge { sets, ways });
        }

        Ok(Self {
            sets,
            ways,
            line_bytes: line_bytes as u64,
            set_bits,
            offset_bits,
        })
    }

    /// Number of sets (`S`).
    #[inline]
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Lines per set (`K`).
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Bytes per line (`B`).
    #[inline]
    pub const fn line_bytes(&self) -> u64 {
        self.line_bytes
    }

    /// Width of the set-index field, `log2(S)`.
    #[inline]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Width of the block-offset field, `log2(B)`.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.set_bits - self.offset_bits
    }

    /// Total number of lines in the cache.
    #[inline]
    pub const fn num_lines(&self) -> usize {
        self.sets * self.ways
    }

    /// Splits an address into `(set_index, tag)`.
    ///
    /// Every 64-bit value is a valid input. When the index and offset fields
    /// cover the whole address the tag is 0.
    #[inline]
    pub fn decompose(&self, addr: u64) -> (usize, u64) {
        let set_mask = (self.sets as u64) - 1;
        let set_index = (addr >> self.offset_bits) & set_mask;
        let tag = addr.checked_shr(self.set_bits + self.offset_bits).unwrap_or(0);
        (set_index as usize, tag)
    }

    /// Addresses of the distinct lines touched by an access.
    ///
    /// Yields `addr` itself followed by every line boundary in
    /// `(addr, addr + len)`. Accesses of 0 or 1 bytes touch exactly one line.
    /// Accesses running past the top of the address space stop at `u64::MAX`.
    pub const fn line_addresses(&self, addr: u64, len: u64) -> LineAddresses {
        LineAddresses {
            next: Some(addr),
            last: addr.saturating_add(len.saturating_sub(1)),
            line_bytes: self.line_bytes,
        }
    }
}

/// Iterator over the line-aligned split points of one access.
///
/// Created by [`CacheGeometry::line_addresses`].
#[derive(Debug, Clone)]
pub struct LineAddresses {
    next: Option<u64>,
    /// Last byte covered by the access (inclusive).
    last: u64,
    line_bytes: u64,
}

impl Iterator for LineAddresses {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.next?;
        let line_start = current & !(self.line_bytes - 1);
        self.next = line_start
            .checked_add(self.line_bytes)
            .filter(|&boundary| boundary <= self.last);
        Some(current)
    }
}
