//! Set-Associative Cache Storage.
//!
//! This module implements the storage half of the cache model: a fixed
//! geometry of `2^s` sets holding exactly `E` lines each. It owns every line
//! exclusively and exposes per-set slices for the access engine to read and
//! update; all decision logic lives in the engine.
//!
//! Storage is a two-level owned container with bounds-checked indexing —
//! an out-of-range set index is a contract violation and panics rather than
//! wrapping or erroring.

use tracing::debug;

use crate::common::error::SimError;
use crate::config::CacheGeometry;

/// One associative storage slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the slot holds a meaningful tag.
    pub valid: bool,
    /// Address tag currently cached. Meaningless while `valid` is false.
    pub tag: u64,
    /// Logical timestamp of this line's most recent hit or fill; orders
    /// lines for eviction. Never reported, only compared.
    pub recency: u64,
}

/// Fixed-geometry associative storage.
///
/// Created once before replay begins and dropped once replay completes;
/// the geometry is immutable for the lifetime of the instance.
#[derive(Clone, Debug)]
pub struct Cache {
    geometry: CacheGeometry,
    sets: Vec<Vec<CacheLine>>,
}

impl Cache {
    /// Allocates storage for `2^s` sets of `E` lines, all lines initialized
    /// invalid with zero tag and recency.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for a degenerate geometry and
    /// [`SimError::Allocation`] if the backing storage cannot be reserved.
    /// Both are fatal: the simulation never starts.
    pub fn new(geometry: CacheGeometry) -> Result<Self, SimError> {
        geometry.validate()?;

        let num_sets = geometry.num_sets();
        let mut sets: Vec<Vec<CacheLine>> = Vec::new();
        sets.try_reserve_exact(num_sets)?;
        for _ in 0..num_sets {
            let mut lines: Vec<CacheLine> = Vec::new();
            lines.try_reserve_exact(geometry.lines_per_set)?;
            lines.resize(geometry.lines_per_set, CacheLine::default());
            sets.push(lines);
        }

        debug!(
            sets = num_sets,
            lines_per_set = geometry.lines_per_set,
            block_bytes = geometry.block_bytes(),
            "cache storage allocated"
        );

        Ok(Self { geometry, sets })
    }

    /// The geometry this cache was built with.
    #[inline]
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// The ordered lines of one set, in storage order.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is not in `[0, 2^s)`. A violating index means
    /// the address decomposition and the geometry disagree — a defect, not a
    /// runtime condition.
    #[inline]
    pub fn lines_in_set(&self, set_index: usize) -> &[CacheLine] {
        &self.sets[set_index]
    }

    /// Mutable access to the ordered lines of one set.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is not in `[0, 2^s)`, as with
    /// [`Self::lines_in_set`].
    #[inline]
    pub fn lines_in_set_mut(&mut self, set_index: usize) -> &mut [CacheLine] {
        &mut self.sets[set_index]
    }
}
