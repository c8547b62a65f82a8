mod common;

use common::MockSink;

use std::io::{self, ErrorKind};

use rowfmt::text::{escape, unquote, unquote_with};
use rowfmt::writer::RowWriterBuilder;
use rowfmt::RowError;
use serde::Serialize;

#[derive(Serialize)]
struct Label {
    name: String,
}

#[test]
fn sink_write_failure_surfaces_as_io_error() {
    let mut sink = MockSink::default();
    sink.expect_write().times(1).returning(|_buf| {
        let err = io::Error::from(ErrorKind::PermissionDenied);
        Result::Err(err)
    });

    let mut wtr = RowWriterBuilder::new().from_writer(sink);

    let result = wtr.write_record(&(1, 2));
    match result {
        Err(RowError::Io(err)) => assert_eq!(err.kind(), ErrorKind::PermissionDenied),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn format_errors_never_reach_the_sink() {
    // A mock with no expectations panics on any write call, so this also
    // proves the failing row produced zero sink traffic.
    let sink = MockSink::default();

    let mut wtr = RowWriterBuilder::new().from_writer(sink);
    wtr.set_fields(["name", "missing"]);

    let result = wtr.write_record(&Label {
        name: "x".to_string(),
    });
    assert!(matches!(result, Err(RowError::FieldNotFound { .. })));

    let result = wtr.write_record(&None::<i32>);
    assert!(matches!(result, Err(RowError::InvalidArgument { .. })));
}

#[test]
fn scalar_records_are_rejected() {
    let sink = MockSink::default();
    let mut wtr = RowWriterBuilder::new().from_writer(sink);

    assert!(matches!(
        wtr.write_record(&42),
        Err(RowError::TypeMismatch(_))
    ));
    assert!(matches!(
        wtr.write_record(&"text"),
        Err(RowError::TypeMismatch(_))
    ));
}

#[test]
fn header_cannot_be_derived_from_a_sequence() {
    let sink = MockSink::default();
    let mut wtr = RowWriterBuilder::new().from_writer(sink);

    assert!(matches!(
        wtr.write_header_from(&(1, 2, 3)),
        Err(RowError::TypeMismatch(_))
    ));
    assert!(matches!(
        wtr.write_header_from(&None::<i32>),
        Err(RowError::InvalidArgument { name: "sample", .. })
    ));
}

#[test]
fn escape_rejects_mismatched_tables() {
    let result = escape("x", '\\', &['\n'], &[]);
    match result {
        Err(RowError::InvalidArgument { name, .. }) => assert_eq!(name, "sequences"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn unquote_rejects_malformed_input() {
    // Missing closing quote.
    assert!(unquote("\"abc").is_err());
    // Not quoted at all.
    assert!(unquote("abc").is_err());
    // Bare quote inside the body.
    assert!(unquote("\"a\"b\"").is_err());
    // Dangling escape at the end of the body.
    assert!(unquote("\"a\\\"").is_err());
    // Unrecognized escape sequence for the configured tables.
    assert!(unquote_with("\"a\\qb\"", '"', '\\', &[], &[]).is_err());
}
