//! Trace Record and Reader Tests.
//!
//! Verifies line parsing (operation codes, hex addresses, decimal lengths),
//! rejection reasons for malformed lines, and that the reader skips rather
//! than fails on them.

use std::io::Write;

use csim_core::common::{ParseRecordError, SimError};
use csim_core::sim::{Operation, TraceReader, TraceRecord, open_trace};
use rstest::rstest;

fn parse(line: &str) -> Result<TraceRecord, ParseRecordError> {
    line.parse()
}

// ══════════════════════════════════════════════════════════
// 1. Well-formed lines
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(" L 10,1", Operation::Load, 0x10, 1)]
#[case(" S 18,1", Operation::Store, 0x18, 1)]
#[case(" M 7ff000398,8", Operation::Modify, 0x7ff0_0039_8, 8)]
#[case("I  0400d7d4,8", Operation::Instruction, 0x0400_d7d4, 8)]
#[case("L 0x1f,4", Operation::Load, 0x1f, 4)]
#[case("\tL   ffffffffffffffff , 2 \n", Operation::Load, u64::MAX, 2)]
#[case("L10,4", Operation::Load, 0x10, 4)]
fn parses_record(
    #[case] line: &str,
    #[case] op: Operation,
    #[case] address: u64,
    #[case] len: u64,
) {
    assert_eq!(parse(line), Ok(TraceRecord::new(op, address, len)));
}

/// Annotations after the length (as printed by reference simulators) are ignored.
#[test]
fn trailing_annotation_is_ignored() {
    assert_eq!(
        parse(" L 10,1 miss eviction"),
        Ok(TraceRecord::new(Operation::Load, 0x10, 1))
    );
}

#[test]
fn record_displays_in_trace_syntax() {
    let record = TraceRecord::new(Operation::Modify, 0x7ff0_0039_8, 8);
    assert_eq!(record.to_string(), "M 7ff000398,8");
}

#[test]
fn accesses_per_line_by_operation() {
    assert_eq!(Operation::Instruction.accesses_per_line(), 0);
    assert_eq!(Operation::Load.accesses_per_line(), 1);
    assert_eq!(Operation::Store.accesses_per_line(), 1);
    assert_eq!(Operation::Modify.accesses_per_line(), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Malformed lines
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("", ParseRecordError::Empty)]
#[case("   \n", ParseRecordError::Empty)]
#[case("X 10,1", ParseRecordError::UnknownOperation("X".into()))]
#[case("==1234== Memcheck", ParseRecordError::UnknownOperation("=".into()))]
#[case("l 10,1", ParseRecordError::UnknownOperation("l".into()))]
#[case("L", ParseRecordError::MissingOperand)]
#[case("L 10", ParseRecordError::MissingComma("10".into()))]
fn rejects_malformed_line(#[case] line: &str, #[case] expected: ParseRecordError) {
    assert_eq!(parse(line), Err(expected));
}

#[test]
fn rejects_bad_address() {
    assert!(matches!(
        parse("L zz,1"),
        Err(ParseRecordError::Address { text, .. }) if text == "zz"
    ));
}

#[rstest]
#[case("L 10,-1", "-1")]
#[case("L 10,", "")]
#[case("L 10,four", "four")]
fn rejects_bad_length(#[case] line: &str, #[case] bad: &str) {
    assert!(matches!(
        parse(line),
        Err(ParseRecordError::Length { text, .. }) if text == bad
    ));
}

// ══════════════════════════════════════════════════════════
// 3. Reader
// ══════════════════════════════════════════════════════════

#[test]
fn reader_skips_unparseable_lines() {
    let text = "==1== header\n L 10,1\n\n garbage\n S 20,4\nM 30,2";
    let mut reader = TraceReader::new(text.as_bytes());

    let records: Vec<TraceRecord> = reader.by_ref().map(Result::unwrap).collect();

    assert_eq!(
        records,
        vec![
            TraceRecord::new(Operation::Load, 0x10, 1),
            TraceRecord::new(Operation::Store, 0x20, 4),
            TraceRecord::new(Operation::Modify, 0x30, 2),
        ]
    );
    assert_eq!(reader.lines_read(), 6);
    assert_eq!(reader.skipped(), 3);
}

#[test]
fn reader_skips_invalid_utf8() {
    let bytes: &[u8] = b"L 10,1\n\xff\xfe\nS 20,1\n";
    let mut reader = TraceReader::new(bytes);

    let records: Vec<TraceRecord> = reader.by_ref().map(Result::unwrap).collect();

    assert_eq!(records.len(), 2);
    assert_eq!(reader.skipped(), 1);
}

#[test]
fn reader_handles_crlf_line_endings() {
    let mut reader = TraceReader::new(" L 10,1\r\n S 20,1\r\n".as_bytes());
    let records: Vec<TraceRecord> = reader.by_ref().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(reader.skipped(), 0);
}

#[test]
fn open_trace_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, " L 10,1").unwrap();
    writeln!(file, " M 20,1").unwrap();

    let reader = open_trace(file.path()).unwrap();
    assert_eq!(reader.count(), 2);
}

#[test]
fn open_trace_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.trace");

    match open_trace(&path) {
        Err(SimError::Open { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected open error, got {other:?}"),
    }
}
