//! Trace Operation Kinds.
//!
//! This module defines the classification of trace records consumed by the
//! replayer. The kind of a record decides how many simulated cache accesses
//! it produces; the access engine itself never distinguishes loads from
//! stores (the model has no write policy).

/// Kind of memory operation recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Data load.
    ///
    /// Produces exactly one simulated cache access.
    Load,

    /// Data store.
    ///
    /// Produces exactly one simulated cache access.
    Store,

    /// Data modify: a load immediately followed by a store to the same
    /// address.
    ///
    /// Produces exactly two back-to-back simulated accesses. The second
    /// always observes the tag the first just installed, so it hits.
    Modify,

    /// Instruction fetch.
    ///
    /// Recorded by the tracer but ignored by the simulation: zero accesses,
    /// zero effect on statistics.
    Instruction,
}

impl AccessKind {
    /// Number of simulated cache accesses a record of this kind produces.
    pub const fn access_count(self) -> usize {
        match self {
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
            Self::Instruction => 0,
        }
    }

    /// The single-letter trace notation for this kind.
    pub const fn letter(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
            Self::Instruction => 'I',
        }
    }

    /// Maps a trace operation letter to its kind.
    ///
    /// Returns `None` for letters the trace format does not define; callers
    /// treat those lines as noise and skip them.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            'I' => Some(Self::Instruction),
            _ => None,
        }
    }
}
