//! Trace Record Parsing.
//!
//! This module reads Valgrind "lackey" style memory traces: one record per
//! line, an operation letter followed by a hexadecimal address and a decimal
//! size, comma-separated. Data operations are indented one space in lackey
//! output while instruction fetches start in column zero; the parser trims
//! leading whitespace so both shapes are accepted.
//!
//! ```text
//! I 0400d7d4,8
//!  L 10,1
//!  M 20,1
//! ```
//!
//! Instruction-fetch lines and lines with an unknown leading letter are
//! ignored entirely. A recognized data operation with a malformed payload is
//! a fatal parse error carrying the line number — replay has no
//! partial-success mode.

use std::io::BufRead;

use crate::common::addr::MemAddr;
use crate::common::data::AccessKind;
use crate::common::error::SimError;

/// One record from a memory-access trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Operation kind.
    pub kind: AccessKind,
    /// Accessed address.
    pub addr: MemAddr,
    /// Access size in bytes. Carried for fidelity; the model does not
    /// simulate partial-block accesses, so it has no effect on replay.
    pub size: u64,
}

/// Parses one trace line into a record.
///
/// Returns `Ok(None)` for every line the simulation ignores: blank lines,
/// instruction fetches, and lines whose leading letter is not a trace
/// operation (tracer banners, comments). Instruction lines are skipped
/// without inspecting their payload, matching their zero-effect contract.
///
/// # Errors
///
/// Returns [`SimError::TraceParse`] when a recognized data operation
/// carries a malformed `addr,size` payload; `line_no` is echoed back in the
/// error.
pub fn parse_line(line: &str, line_no: u64) -> Result<Option<TraceRecord>, SimError> {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();

    let Some(letter) = chars.next() else {
        return Ok(None);
    };
    let Some(kind) = AccessKind::from_letter(letter) else {
        return Ok(None);
    };
    if kind == AccessKind::Instruction {
        return Ok(None);
    }

    let malformed = || SimError::TraceParse {
        line: line_no,
        record: line.trim_end().to_string(),
    };

    let payload = chars.as_str().trim();
    let (addr_text, size_text) = payload.split_once(',').ok_or_else(malformed)?;
    let addr = u64::from_str_radix(addr_text.trim(), 16).map_err(|_| malformed())?;
    let size = size_text
        .trim()
        .parse::<u64>()
        .map_err(|_| malformed())?;

    Ok(Some(TraceRecord {
        kind,
        addr: MemAddr::new(addr),
        size,
    }))
}

/// Streams parsed records out of a trace source, skipping ignored lines and
/// tracking line numbers for error reporting.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    line_no: u64,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered trace source.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, SimError>;

    /// Yields the next simulated record, or the first I/O or parse error.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.source.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    match parse_line(&self.buf, self.line_no) {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => {}
                        Err(err) => return Some(Err(err)),
                    }
                }
                Err(err) => return Some(Err(SimError::from(err))),
            }
        }
    }
}
