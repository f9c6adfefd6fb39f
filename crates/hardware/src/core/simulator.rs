//! Access-Simulation Engine.
//!
//! This module is the algorithmic heart of the simulator: given one memory
//! address, it decomposes it against the cache geometry, resolves the access
//! as a hit, a cold fill, or an eviction, and advances the logical clock
//! that orders lines for LRU replacement.
//!
//! Replacement uses a recency stamp per line plus a linear scan for the
//! minimum — no linked lists or hash maps. At the associativities a hardware
//! set reaches (typically 1–16 lines) the scan is as fast as anything with
//! pointers, and the tie-break (first minimum in storage order) is exact and
//! deterministic.

use std::fmt;

use tracing::trace;

use crate::common::addr::MemAddr;
use crate::common::error::SimError;
use crate::config::CacheGeometry;
use crate::core::cache::{Cache, CacheLine};
use crate::stats::SimStats;

/// Classification of one simulated access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The tag was already resident in its set.
    Hit,
    /// The tag was absent and filled an invalid line; nothing was displaced.
    Miss,
    /// The tag was absent and the set was full; the least recently used
    /// line was overwritten.
    MissEviction,
}

impl fmt::Display for AccessOutcome {
    /// Formats the outcome in trace-echo notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::MissEviction => write!(f, "miss eviction"),
        }
    }
}

/// Selects the victim slot for a full set: the line with the smallest
/// recency stamp, ties broken by the lowest slot position.
///
/// `min_by_key` keeps the first of equal minima, which is exactly the
/// first-minimum-wins contract of the linear scan.
pub fn lru_victim(lines: &[CacheLine]) -> usize {
    lines
        .iter()
        .enumerate()
        .min_by_key(|(_, line)| line.recency)
        .map_or(0, |(slot, _)| slot)
}

/// The access-simulation engine.
///
/// Owns the cache storage, the global logical clock, and the statistics
/// counters; nothing else may mutate any of the three. The engine is
/// sequential — each access runs to completion before the next begins.
#[derive(Debug)]
pub struct AccessSimulator {
    cache: Cache,
    clock: u64,
    stats: SimStats,
}

impl AccessSimulator {
    /// Builds an engine over freshly allocated cache storage.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::Config`] and [`SimError::Allocation`] from
    /// cache construction.
    pub fn new(geometry: CacheGeometry) -> Result<Self, SimError> {
        Ok(Self {
            cache: Cache::new(geometry)?,
            clock: 0,
            stats: SimStats::default(),
        })
    }

    /// Simulates one memory access and classifies it.
    ///
    /// Decomposes `addr` into tag and set index, then:
    /// 1. scans the set for a valid line with a matching tag (hit);
    /// 2. failing that, fills the first invalid line (cold miss);
    /// 3. failing that, overwrites the least recently used line (eviction).
    ///
    /// The clock advances by exactly one per completed access, and the
    /// touched line takes the new clock value as its recency stamp.
    pub fn access(&mut self, addr: MemAddr) -> AccessOutcome {
        let geometry = *self.cache.geometry();
        let tag = addr.tag(&geometry);
        let set_index = addr.set_index(&geometry);

        let lines = self.cache.lines_in_set_mut(set_index);

        // Hit check: the scan stops at the first valid line with a matching
        // tag. The hit-before-insert order is what keeps tags unique per set.
        if let Some(line) = lines.iter_mut().find(|line| line.valid && line.tag == tag) {
            self.clock += 1;
            line.recency = self.clock;
            self.stats.hits += 1;
            trace!(addr = %addr, set = set_index, tag, "hit");
            return AccessOutcome::Hit;
        }

        self.stats.misses += 1;

        // Cold path: an invalid line is free, so nothing is displaced.
        if let Some(line) = lines.iter_mut().find(|line| !line.valid) {
            self.clock += 1;
            line.valid = true;
            line.tag = tag;
            line.recency = self.clock;
            trace!(addr = %addr, set = set_index, tag, "miss, cold fill");
            return AccessOutcome::Miss;
        }

        // Set is full: overwrite the LRU line. The victim stays valid — tag
        // overwrite is the only invalidation path this model has.
        self.stats.evictions += 1;
        let victim = lru_victim(lines);
        self.clock += 1;
        let line = &mut lines[victim];
        line.tag = tag;
        line.recency = self.clock;
        trace!(addr = %addr, set = set_index, tag, victim, "miss, eviction");
        AccessOutcome::MissEviction
    }

    /// Read-only view of the cache storage.
    #[inline]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// The geometry the engine was built with.
    #[inline]
    pub const fn geometry(&self) -> &CacheGeometry {
        self.cache.geometry()
    }

    /// Running statistics snapshot.
    #[inline]
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Consumes the engine, releasing the cache storage and yielding the
    /// final counters.
    #[inline]
    pub fn into_stats(self) -> SimStats {
        self.stats
    }
}
