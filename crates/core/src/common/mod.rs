//! Common utilities and types used throughout the cache simulator.
//!
//! 1. **Constants:** Address width and other fixed parameters.
//! 2. **Error Handling:** Configuration, trace and run-level error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, trace parsing and simulation runs.
pub mod error;

pub use constants::ADDRESS_BITS;
pub use error::{ConfigError, ParseRecordError, SimError};
