//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays a recorded sequence of memory accesses against a cache
//! model and reports hit, miss and eviction counts. It provides:
//! 1. **Cache:** Address decomposition, a flat line store, and FIFO/LRU replacement.
//! 2. **Configuration:** Geometry and policy selection with validation and JSON loading.
//! 3. **Simulation:** Trace parsing, line splitting of multi-byte accesses, and replay.
//! 4. **Statistics:** Hit/miss/eviction counters and the summary line.

/// Common types and constants (error types, address width).
pub mod common;
/// Cache geometry, line store, eviction engine and replacement policies.
pub mod cache;
/// Simulator configuration (geometry, policy selection, JSON loading).
pub mod config;
/// Trace reading and replay.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; build with struct literals or `CacheConfig::from_json_file`.
pub use crate::config::CacheConfig;
/// Eviction engine operating on a single cache instance.
pub use crate::cache::{AccessOutcome, CacheSim};
/// Top-level simulation run; owns the cache and replays traces.
pub use crate::sim::Simulator;
/// Final counters of a run.
pub use crate::stats::SimStats;
