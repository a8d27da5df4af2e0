// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Parser for clockspan report lines
//!
//! Turns a captured report line back into its fields so tests can assert on
//! locations, line numbers, thread ids, and durations without string
//! gymnastics. The accepted shapes are exactly the two the library emits:
//!
//! ```text
//! [CLOCK]	<file>::<function>	lines <start>-<stop> [thread <hex>]:	<ns> ns
//! [CLOCK]	<file>::<name>	line <line> [thread <hex>]:	<ns> ns
//! ```

use thiserror::Error;

/// Errors from [`parse_report_line`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not begin with the `[CLOCK]` marker
    #[error("missing [CLOCK] marker in: {0}")]
    MissingMarker(String),

    /// The line does not split into the expected tab-separated fields
    #[error("expected 4 tab-separated fields, found {found}")]
    FieldCount { found: usize },

    /// The line-number section is malformed
    #[error("malformed line numbers in: {0}")]
    BadLineNumbers(String),

    /// The thread tag is missing or not hexadecimal
    #[error("malformed thread tag in: {0}")]
    BadThread(String),

    /// The duration field is malformed
    #[error("malformed duration in: {0}")]
    BadDuration(String),
}

/// Line-number information carried by a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRange {
    /// A start/stop bracket: `lines <start>-<stop>`
    Span { start: u32, stop: u32 },
    /// A single invocation: `line <line>`
    Single(u32),
}

/// One parsed report line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReport {
    /// The `<file>::<function>` or `<file>::<name>` field, verbatim
    pub location: String,
    /// Bracket or single-invocation line numbers
    pub lines: LineRange,
    /// Thread id, decoded from lowercase hex
    pub thread: u64,
    /// Elapsed nanoseconds
    pub nanos: u64,
}

impl ParsedReport {
    /// True when this report came from a start/stop bracket
    pub fn is_span(&self) -> bool {
        matches!(self.lines, LineRange::Span { .. })
    }
}

/// Parse one report line into its fields
pub fn parse_report_line(line: &str) -> Result<ParsedReport, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 4 {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    }
    if fields[0] != "[CLOCK]" {
        return Err(ParseError::MissingMarker(line.to_owned()));
    }

    let (lines, thread) = parse_position(fields[2])?;
    let nanos = fields[3]
        .strip_suffix(" ns")
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| ParseError::BadDuration(fields[3].to_owned()))?;

    Ok(ParsedReport {
        location: fields[1].to_owned(),
        lines,
        thread,
        nanos,
    })
}

// Field shapes: "lines 10-12 [thread ff]:" or "line 7 [thread ff]:"
fn parse_position(field: &str) -> Result<(LineRange, u64), ParseError> {
    let rest = field
        .strip_suffix("]:")
        .ok_or_else(|| ParseError::BadThread(field.to_owned()))?;
    let (numbers, thread_hex) = rest
        .split_once(" [thread ")
        .ok_or_else(|| ParseError::BadThread(field.to_owned()))?;
    let thread = u64::from_str_radix(thread_hex, 16)
        .map_err(|_| ParseError::BadThread(field.to_owned()))?;

    let lines = if let Some(span) = numbers.strip_prefix("lines ") {
        let (start, stop) = span
            .split_once('-')
            .ok_or_else(|| ParseError::BadLineNumbers(field.to_owned()))?;
        LineRange::Span {
            start: parse_line_number(start, field)?,
            stop: parse_line_number(stop, field)?,
        }
    } else if let Some(single) = numbers.strip_prefix("line ") {
        LineRange::Single(parse_line_number(single, field)?)
    } else {
        return Err(ParseError::BadLineNumbers(field.to_owned()));
    };

    Ok((lines, thread))
}

fn parse_line_number(value: &str, field: &str) -> Result<u32, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::BadLineNumbers(field.to_owned()))
}
