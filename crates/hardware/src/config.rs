//! Configuration for the simulated cache geometry.
//!
//! This module defines the parameters that fix a cache's shape for the
//! lifetime of one replay. It provides:
//! 1. **Defaults:** A baseline geometry for quick experiments.
//! 2. **Derivation:** Set count, block size, and total line count computed
//!    from the bit-field widths.
//! 3. **Validation:** Fail-fast rejection of degenerate geometries before
//!    any storage is allocated.
//!
//! Geometry is supplied either from command-line flags or as JSON
//! (`serde_json`), with per-field defaults applied to omitted keys.

use serde::Deserialize;

use crate::common::error::SimError;

/// Default geometry constants.
///
/// These match the smallest configuration commonly used to exercise the
/// simulator: 16 sets, direct-mapped, 16-byte blocks.
mod defaults {
    /// Default number of set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default number of lines per set (direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default number of block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;
}

/// Geometry of the simulated cache: `2^set_bits` sets of `lines_per_set`
/// lines, each caching a `2^block_bits`-byte block.
///
/// All three parameters are fixed at construction and immutable thereafter.
///
/// # Examples
///
/// Creating a default geometry:
///
/// ```
/// use csim_core::config::CacheGeometry;
///
/// let geometry = CacheGeometry::default();
/// assert_eq!(geometry.num_sets(), 16);
/// assert_eq!(geometry.block_bytes(), 16);
/// assert_eq!(geometry.total_lines(), 16);
/// ```
///
/// Deserializing from JSON (the `--config` file format); omitted fields take
/// their defaults:
///
/// ```
/// use csim_core::config::CacheGeometry;
///
/// let json = r#"{ "set_bits": 2, "lines_per_set": 4 }"#;
/// let geometry: CacheGeometry = serde_json::from_str(json)?;
/// assert_eq!(geometry.num_sets(), 4);
/// assert_eq!(geometry.lines_per_set, 4);
/// assert_eq!(geometry.block_bits, 4);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct CacheGeometry {
    /// Number of set-index bits `s`; the cache has `2^s` sets.
    #[serde(default = "default_set_bits")]
    pub set_bits: u32,

    /// Number of lines per set `E` (the associativity).
    #[serde(default = "default_lines_per_set")]
    pub lines_per_set: usize,

    /// Number of block-offset bits `b`; each block holds `2^b` bytes.
    #[serde(default = "default_block_bits")]
    pub block_bits: u32,
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            lines_per_set: defaults::LINES_PER_SET,
            block_bits: defaults::BLOCK_BITS,
        }
    }
}

impl CacheGeometry {
    /// Number of sets, `2^set_bits`.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        1_usize << self.set_bits
    }

    /// Block size in bytes, `2^block_bits`.
    #[inline]
    pub const fn block_bytes(&self) -> u64 {
        1_u64 << self.block_bits
    }

    /// Total number of lines across all sets.
    #[inline]
    pub const fn total_lines(&self) -> usize {
        self.num_sets() * self.lines_per_set
    }

    /// Checks the geometry for degenerate values.
    ///
    /// Set-index and block-offset bit counts and the line count must all be
    /// positive (`2^s`, `2^b`, and the shift arithmetic are undefined
    /// otherwise), and the two bit fields together must leave at least one
    /// tag bit in a 64-bit address.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] naming the offending parameter. The
    /// simulation must not be constructed from a geometry that fails here.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.set_bits == 0 {
            return Err(SimError::config("set-index bit count (s) must be positive"));
        }
        if self.lines_per_set == 0 {
            return Err(SimError::config("lines per set (E) must be positive"));
        }
        if self.block_bits == 0 {
            return Err(SimError::config(
                "block-offset bit count (b) must be positive",
            ));
        }
        let field_bits = self.set_bits + self.block_bits;
        if field_bits >= u64::BITS {
            return Err(SimError::config(format!(
                "s + b = {field_bits} leaves no tag bits in a 64-bit address"
            )));
        }
        Ok(())
    }
}

fn default_set_bits() -> u32 {
    defaults::SET_BITS
}

fn default_lines_per_set() -> usize {
    defaults::LINES_PER_SET
}

fn default_block_bits() -> u32 {
    defaults::BLOCK_BITS
}
