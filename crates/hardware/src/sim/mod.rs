//! Simulation harness: trace parsing and replay.
//!
//! Streams records out of a Valgrind-style memory trace and drives the
//! access engine with the per-record multiplicity each operation requires.

/// Trace replay: feeds parsed records into the access engine.
pub mod replay;

/// Trace record parsing and streaming.
pub mod trace;

pub use replay::{RecordOutcome, Replayer};
pub use trace::{TraceReader, TraceRecord, parse_line};
