//! Trace reading and replay.
//!
//! Provides the trace record parser and the run object that drives a cache
//! through a trace.

/// Trace run object.
pub mod simulator;
/// Trace record parsing and reading.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{Operation, TraceReader, TraceRecord, open_trace};
