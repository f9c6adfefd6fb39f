//! # Cache Storage Tests
//!
//! Verifies construction, initialization, per-set access, and the
//! out-of-range contract of the associative storage.

use csim_core::common::SimError;
use csim_core::config::CacheGeometry;
use csim_core::core::{Cache, CacheLine};

/// Creates a small test cache: 4 sets, 3 lines per set, 2-byte blocks.
fn test_cache() -> Cache {
    let geometry = CacheGeometry {
        set_bits: 2,
        lines_per_set: 3,
        block_bits: 1,
    };
    Cache::new(geometry).unwrap()
}

/// Every line starts invalid with zero tag and recency.
#[test]
fn construction_initializes_all_lines() {
    let cache = test_cache();
    assert_eq!(cache.geometry().num_sets(), 4);

    for set_index in 0..cache.geometry().num_sets() {
        let lines = cache.lines_in_set(set_index);
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert_eq!(*line, CacheLine::default());
            assert!(!line.valid);
            assert_eq!(line.tag, 0);
            assert_eq!(line.recency, 0);
        }
    }
}

/// The geometry is preserved as supplied.
#[test]
fn geometry_is_immutable_after_construction() {
    let cache = test_cache();
    assert_eq!(cache.geometry().set_bits, 2);
    assert_eq!(cache.geometry().lines_per_set, 3);
    assert_eq!(cache.geometry().block_bits, 1);
}

/// Line updates through the mutable set view are visible on re-read.
#[test]
fn set_views_expose_line_state() {
    let mut cache = test_cache();

    let lines = cache.lines_in_set_mut(1);
    lines[2].valid = true;
    lines[2].tag = 0xbeef;
    lines[2].recency = 7;

    let lines = cache.lines_in_set(1);
    assert!(lines[2].valid);
    assert_eq!(lines[2].tag, 0xbeef);
    assert_eq!(lines[2].recency, 7);

    // Other sets are untouched.
    assert_eq!(cache.lines_in_set(0)[2], CacheLine::default());
}

/// Degenerate geometries are rejected before any storage is touched.
#[test]
fn construction_rejects_degenerate_geometry() {
    let geometry = CacheGeometry {
        set_bits: 0,
        lines_per_set: 1,
        block_bits: 1,
    };
    assert!(matches!(
        Cache::new(geometry),
        Err(SimError::Config { .. })
    ));
}

/// An out-of-range set index is a contract violation, not an error value.
#[test]
#[should_panic(expected = "index out of bounds")]
fn out_of_range_set_index_panics() {
    let cache = test_cache();
    let _ = cache.lines_in_set(cache.geometry().num_sets());
}
