// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the report line parser
//!
//! Runs a realistic captured session transcript through the public API and
//! checks that every line round-trips into sensible fields.

use clockspan_test_utils::{LineRange, ParsedReport, parse_report_line};

// The kind of output a short instrumented run produces: nested brackets,
// single invocations, and more than one thread.
const SESSION: &[&str] = &[
    "[CLOCK]\tsrc/index.rs::app::index::rebuild\tlines 14-31 [thread 1]:\t2150734 ns",
    "[CLOCK]\tsrc/index.rs::app::index::rebuild\tlines 18-22 [thread 1]:\t104211 ns",
    "[CLOCK]\tsrc/io.rs::flush_pages()\tline 77 [thread 2]:\t51873 ns",
    "[CLOCK]\tsrc/io.rs::lambda()\tline 91 [thread 2]:\t939 ns",
    "[CLOCK]\tsrc/index.rs::app::index::rebuild\tlines 14-31 [thread 2]:\t1986001 ns",
];

fn parse_session() -> Vec<ParsedReport> {
    SESSION
        .iter()
        .map(|line| parse_report_line(line).expect("session line should parse"))
        .collect()
}

#[test]
fn test_session_transcript_parses_completely() {
    let reports = parse_session();
    assert_eq!(reports.len(), SESSION.len());

    for report in &reports {
        assert!(!report.location.is_empty());
        assert!(report.thread > 0);
    }
}

#[test]
fn test_session_distinguishes_brackets_from_calls() {
    let reports = parse_session();

    let spans: Vec<_> = reports.iter().filter(|r| r.is_span()).collect();
    let singles: Vec<_> = reports.iter().filter(|r| !r.is_span()).collect();
    assert_eq!(spans.len(), 3);
    assert_eq!(singles.len(), 2);

    assert!(spans.iter().all(|r| matches!(
        r.lines,
        LineRange::Span { start, stop } if start < stop
    )));
    assert_eq!(singles[0].location, "src/io.rs::flush_pages()");
    assert_eq!(singles[1].location, "src/io.rs::lambda()");
}

#[test]
fn test_session_groups_by_thread() {
    let reports = parse_session();

    let on_first: Vec<_> = reports.iter().filter(|r| r.thread == 1).collect();
    let on_second: Vec<_> = reports.iter().filter(|r| r.thread == 2).collect();
    assert_eq!(on_first.len(), 2);
    assert_eq!(on_second.len(), 3);

    // the same call site shows up on both threads
    assert!(on_first
        .iter()
        .any(|r| r.location == "src/index.rs::app::index::rebuild"));
    assert!(on_second
        .iter()
        .any(|r| r.location == "src/index.rs::app::index::rebuild"));
}

#[test]
fn test_session_durations_are_exact() {
    let reports = parse_session();
    assert_eq!(reports[0].nanos, 2_150_734);
    assert_eq!(reports[3].nanos, 939);
}
