//! # Trace Parsing Tests
//!
//! Verifies lackey-format line parsing: recognized operations, ignored
//! lines, malformed payload rejection with line numbers, and streaming over
//! a buffered source.

use std::io::Cursor;

use csim_core::common::{AccessKind, MemAddr, SimError};
use csim_core::sim::{TraceReader, TraceRecord, parse_line};
use pretty_assertions::assert_eq;

#[test]
fn parses_an_indented_load() {
    let record = parse_line(" L 10,1", 1).unwrap();
    assert_eq!(
        record,
        Some(TraceRecord {
            kind: AccessKind::Load,
            addr: MemAddr::new(0x10),
            size: 1,
        })
    );
}

#[test]
fn parses_a_store_without_indentation() {
    let record = parse_line("S 7ff000398,8", 1).unwrap();
    assert_eq!(
        record,
        Some(TraceRecord {
            kind: AccessKind::Store,
            addr: MemAddr::new(0x7_ff00_0398),
            size: 8,
        })
    );
}

#[test]
fn parses_a_modify() {
    let record = parse_line(" M 20,4", 1).unwrap();
    assert_eq!(
        record,
        Some(TraceRecord {
            kind: AccessKind::Modify,
            addr: MemAddr::new(0x20),
            size: 4,
        })
    );
}

/// Instruction fetches are skipped without inspecting their payload.
#[test]
fn instruction_lines_are_ignored() {
    assert_eq!(parse_line("I 0400d7d4,8", 1).unwrap(), None);
    assert_eq!(parse_line("I", 1).unwrap(), None);
}

/// Tracer banners, blank lines, and unknown letters are noise.
#[test]
fn unrecognized_lines_are_ignored() {
    assert_eq!(parse_line("", 1).unwrap(), None);
    assert_eq!(parse_line("\n", 1).unwrap(), None);
    assert_eq!(parse_line("==12345== lackey output", 1).unwrap(), None);
    assert_eq!(parse_line(" X 10,1", 1).unwrap(), None);
    assert_eq!(parse_line(" l 10,1", 1).unwrap(), None);
}

/// A recognized operation with a bad payload is fatal and names the line.
#[test]
fn malformed_data_operations_are_rejected() {
    for bad in [" L zz,1", " L 10", " L 10,xyz", " M ,4"] {
        let err = parse_line(bad, 7).unwrap_err();
        match err {
            SimError::TraceParse { line, record } => {
                assert_eq!(line, 7);
                assert_eq!(record, bad);
            }
            other => panic!("expected TraceParse, got {other:?}"),
        }
    }
}

/// The size field is parsed but carries no meaning beyond fidelity.
#[test]
fn size_field_is_carried_verbatim() {
    let record = parse_line(" L 10,128", 1).unwrap().unwrap();
    assert_eq!(record.size, 128);
}

/// The reader yields only simulated records and counts every source line.
#[test]
fn reader_skips_ignored_lines() {
    let trace = "I 0400d7d4,8\n L 10,1\n==000== banner\n M 20,1\n S 18,8\n";
    let records: Vec<TraceRecord> = TraceReader::new(Cursor::new(trace))
        .collect::<Result<_, _>>()
        .unwrap();

    let kinds: Vec<AccessKind> = records.iter().map(|record| record.kind).collect();
    assert_eq!(
        kinds,
        vec![AccessKind::Load, AccessKind::Modify, AccessKind::Store]
    );
}

/// Errors surface with the 1-based line number of the offending line.
#[test]
fn reader_reports_the_failing_line_number() {
    let trace = "I 0,4\n L 10,1\n L bogus\n L 20,1\n";
    let mut reader = TraceReader::new(Cursor::new(trace));

    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.addr, MemAddr::new(0x10));

    match reader.next().unwrap() {
        Err(SimError::TraceParse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected TraceParse, got {other:?}"),
    }
}

/// An empty source yields nothing at all.
#[test]
fn reader_over_empty_source() {
    let mut reader = TraceReader::new(Cursor::new(""));
    assert!(reader.next().is_none());
}
