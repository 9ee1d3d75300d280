//! Simulator-wide constants.

/// Width of a simulated memory address in bits.
///
/// Tag bits are whatever remains after the set-index and block-offset fields
/// are carved out of an address of this width.
pub const ADDRESS_BITS: u32 = 64;

/// Policy names accepted on the command line and in configuration files.
pub const POLICY_NAMES: &str = "'FIFO', 'LRU'";
