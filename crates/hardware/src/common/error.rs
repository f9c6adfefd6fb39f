//! Error definitions.
//!
//! This module defines the crate-wide error enum. Every variant is a
//! precondition failure discovered once — nothing here is retried, and there
//! is no partial-success mode: either the full trace replays and the final
//! counts are valid, or the run aborts before producing any counts.
//!
//! Contract violations (an internally computed set index outside the cache)
//! are deliberately *not* represented here: they indicate a defect in the
//! geometry/address interaction and panic instead.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors produced while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The requested cache geometry is degenerate.
    ///
    /// Raised before construction when a bit count or line count is zero, or
    /// when the set-index and block-offset fields leave no tag bits in a
    /// 64-bit address. The simulation never starts.
    #[error("invalid cache geometry: {reason}")]
    Config {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },

    /// Backing storage for the cache could not be reserved.
    ///
    /// Raised during construction, before any access is processed.
    #[error("cache storage allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// The trace source could not be read.
    #[error("trace input failed: {0}")]
    TraceIo(#[from] std::io::Error),

    /// A recognized trace record could not be parsed.
    ///
    /// Unrecognized lines are skipped silently; this is raised only when a
    /// line names a known operation but carries a malformed address or size.
    #[error("trace line {line}: malformed record `{record}`")]
    TraceParse {
        /// 1-based line number within the trace source.
        line: u64,
        /// The offending line, trailing newline stripped.
        record: String,
    },
}

impl SimError {
    /// Builds a [`SimError::Config`] from a reason string.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
