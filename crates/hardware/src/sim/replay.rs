//! Trace Replay.
//!
//! This module owns the driver side of a simulation: it feeds parsed trace
//! records into the access engine with the multiplicity each operation kind
//! requires — one access for a load or store, two back-to-back accesses on
//! the same address for a modify, none for anything else.

use std::io::BufRead;

use tracing::debug;

use crate::common::data::AccessKind;
use crate::common::error::SimError;
use crate::config::CacheGeometry;
use crate::core::simulator::{AccessOutcome, AccessSimulator};
use crate::sim::trace::{TraceReader, TraceRecord};
use crate::stats::SimStats;

/// Outcomes of the zero, one, or two accesses a single record produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Outcome of the record's first access, if it produced any.
    pub first: Option<AccessOutcome>,
    /// Outcome of the second access of a modify record.
    pub second: Option<AccessOutcome>,
}

impl RecordOutcome {
    /// The outcomes in access order.
    pub fn outcomes(self) -> impl Iterator<Item = AccessOutcome> {
        self.first.into_iter().chain(self.second)
    }
}

/// Replays a memory-access trace against one cache instance.
///
/// Thin owner of the engine: all decisions happen in
/// [`AccessSimulator::access`]; the replayer only applies the per-record
/// access multiplicity and surfaces outcomes to the driver.
#[derive(Debug)]
pub struct Replayer {
    simulator: AccessSimulator,
}

impl Replayer {
    /// Builds a replayer over a freshly constructed cache.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::Config`] and [`SimError::Allocation`] from
    /// engine construction.
    pub fn new(geometry: CacheGeometry) -> Result<Self, SimError> {
        Ok(Self {
            simulator: AccessSimulator::new(geometry)?,
        })
    }

    /// Applies one record to the cache.
    ///
    /// Loads and stores issue one access; a modify issues a load followed by
    /// a store to the same address (the second access always hits, since the
    /// first just installed the tag); instruction fetches issue nothing.
    pub fn step(&mut self, record: &TraceRecord) -> RecordOutcome {
        match record.kind {
            AccessKind::Load | AccessKind::Store => RecordOutcome {
                first: Some(self.simulator.access(record.addr)),
                second: None,
            },
            AccessKind::Modify => {
                let first = self.simulator.access(record.addr);
                let second = self.simulator.access(record.addr);
                RecordOutcome {
                    first: Some(first),
                    second: Some(second),
                }
            }
            AccessKind::Instruction => RecordOutcome {
                first: None,
                second: None,
            },
        }
    }

    /// Replays an entire trace source to completion.
    ///
    /// Returns the number of simulated records applied. An empty source is a
    /// valid replay: the cache is still constructed and dropped cleanly and
    /// all counters stay zero.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError::TraceIo`] or [`SimError::TraceParse`]
    /// encountered; counters from a failed replay must not be reported.
    pub fn replay<R: BufRead>(&mut self, source: R) -> Result<u64, SimError> {
        let mut records = 0_u64;
        for item in TraceReader::new(source) {
            let record = item?;
            let _ = self.step(&record);
            records += 1;
        }
        debug!(records, "trace replay complete");
        Ok(records)
    }

    /// Read-only view of the engine.
    #[inline]
    pub const fn simulator(&self) -> &AccessSimulator {
        &self.simulator
    }

    /// Running statistics snapshot.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        self.simulator.stats()
    }

    /// Consumes the replayer, releasing cache storage and yielding the final
    /// counters.
    #[inline]
    pub fn into_stats(self) -> SimStats {
        self.simulator.into_stats()
    }
}
