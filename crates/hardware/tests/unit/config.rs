//! # Configuration Tests
//!
//! Tests for geometry defaults, derived values, JSON deserialization, and
//! fail-fast validation of degenerate parameters.

use csim_core::common::SimError;
use csim_core::config::CacheGeometry;

#[test]
fn default_geometry() {
    let geometry = CacheGeometry::default();
    assert_eq!(geometry.set_bits, 4);
    assert_eq!(geometry.lines_per_set, 1);
    assert_eq!(geometry.block_bits, 4);
}

#[test]
fn derived_values() {
    let geometry = CacheGeometry {
        set_bits: 3,
        lines_per_set: 4,
        block_bits: 5,
    };
    assert_eq!(geometry.num_sets(), 8);
    assert_eq!(geometry.block_bytes(), 32);
    assert_eq!(geometry.total_lines(), 32);
}

#[test]
fn validate_accepts_positive_geometry() {
    let geometry = CacheGeometry {
        set_bits: 1,
        lines_per_set: 1,
        block_bits: 1,
    };
    assert!(geometry.validate().is_ok());
}

#[test]
fn validate_rejects_zero_set_bits() {
    let geometry = CacheGeometry {
        set_bits: 0,
        lines_per_set: 1,
        block_bits: 1,
    };
    assert!(matches!(
        geometry.validate(),
        Err(SimError::Config { reason }) if reason.contains("set-index")
    ));
}

#[test]
fn validate_rejects_zero_lines_per_set() {
    let geometry = CacheGeometry {
        set_bits: 1,
        lines_per_set: 0,
        block_bits: 1,
    };
    assert!(matches!(
        geometry.validate(),
        Err(SimError::Config { reason }) if reason.contains("lines per set")
    ));
}

#[test]
fn validate_rejects_zero_block_bits() {
    let geometry = CacheGeometry {
        set_bits: 1,
        lines_per_set: 1,
        block_bits: 0,
    };
    assert!(matches!(
        geometry.validate(),
        Err(SimError::Config { reason }) if reason.contains("block-offset")
    ));
}

/// s + b must leave at least one tag bit in a 64-bit address.
#[test]
fn validate_rejects_fields_covering_the_address() {
    let geometry = CacheGeometry {
        set_bits: 32,
        lines_per_set: 1,
        block_bits: 32,
    };
    assert!(matches!(
        geometry.validate(),
        Err(SimError::Config { reason }) if reason.contains("tag bits")
    ));
}

#[test]
fn json_with_all_fields() {
    let json = r#"{ "set_bits": 8, "lines_per_set": 2, "block_bits": 6 }"#;
    let geometry: CacheGeometry = serde_json::from_str(json).unwrap();
    assert_eq!(geometry.set_bits, 8);
    assert_eq!(geometry.lines_per_set, 2);
    assert_eq!(geometry.block_bits, 6);
}

/// Omitted fields take their defaults, as with the `--config` file.
#[test]
fn json_with_partial_fields_uses_defaults() {
    let json = r#"{ "lines_per_set": 8 }"#;
    let geometry: CacheGeometry = serde_json::from_str(json).unwrap();
    assert_eq!(geometry.set_bits, 4);
    assert_eq!(geometry.lines_per_set, 8);
    assert_eq!(geometry.block_bits, 4);
}

#[test]
fn json_empty_object_is_the_default() {
    let geometry: CacheGeometry = serde_json::from_str("{}").unwrap();
    assert_eq!(geometry, CacheGeometry::default());
}
