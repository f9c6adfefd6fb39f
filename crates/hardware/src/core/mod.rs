//! Core cache model and access engine.
//!
//! This module contains the associative storage that represents the cache
//! and the engine that decides the fate of each memory access, mutating the
//! storage and the statistics counters as it goes.

/// Associative line storage: sets, lines, valid bits, tags, recency stamps.
pub mod cache;

/// Access-simulation engine: hit / cold-fill / LRU-eviction decisions.
pub mod simulator;

pub use self::cache::{Cache, CacheLine};
pub use self::simulator::{AccessOutcome, AccessSimulator};
