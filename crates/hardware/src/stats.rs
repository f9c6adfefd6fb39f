//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of one trace replay. It provides:
//! 1. **Counters:** Hits, misses, and evictions, mutated only by the access
//!    engine.
//! 2. **Summary line:** The canonical `hits:H misses:M evictions:E` string
//!    consumed by downstream tooling.
//! 3. **Report:** A formatted end-of-run report with derived totals, hit
//!    rate, and host wall time.

use std::time::Instant;

/// Replay statistics: one counter per access outcome.
///
/// Initialized to zero when the engine is built, incremented exactly once
/// per access at the point the outcome is decided, and read once at the end
/// of the full trace.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) evictions: u64,
}

impl Default for SimStats {
    /// Returns zeroed counters with the wall clock started now.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }
}

impl SimStats {
    /// Total cache hits.
    #[inline]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Total cache misses (with or without eviction).
    #[inline]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Total evictions. Always a subset of the misses.
    #[inline]
    pub const fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Total simulated accesses (hits plus misses).
    #[inline]
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`; zero for an empty replay.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// The canonical one-line summary, also written to the results file.
    pub fn summary_line(&self) -> String {
        format!(
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }

    /// Prints the formatted end-of-run report.
    ///
    /// Displays the counters, derived totals and rates, and the host time
    /// elapsed since the engine was constructed.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let total = self.accesses();
        let rate = if seconds > 0.0 {
            total as f64 / seconds / 1_000_000.0
        } else {
            0.0
        };

        println!("\n==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_accesses             {total}");
        println!("sim_rate                 {rate:.2} Maccess/s");
        println!("----------------------------------------------------------");
        println!("  hits                   {}", self.hits);
        println!("  misses                 {}", self.misses);
        println!("  evictions              {}", self.evictions);
        println!("  hit_rate               {:.2}%", self.hit_rate() * 100.0);
        println!("==========================================================");
    }
}
