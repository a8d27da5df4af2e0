// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Report formatting and sinks
//!
//! Every completed measurement becomes exactly one line:
//!
//! ```text
//! [CLOCK]	a.cpp::main	lines 10-12 [thread 1]:	523 ns
//! [CLOCK]	a.cpp::lambda()	line 7 [thread 1]:	1371 ns
//! ```
//!
//! Fields are tab-separated and the thread id is lowercase hex without a
//! `0x` prefix. Lines go to a [`ReportSink`]; the default is stderr.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::site::{CallSite, CalleeName};
use crate::thread_id::ThreadToken;

/// Destination for finished report lines
///
/// Implementations must write each line atomically with respect to other
/// reporters: one line never interleaves with another. Ordering across
/// threads is unspecified.
pub trait ReportSink: Send + Sync {
    /// Write one report line. `line` carries no trailing newline.
    fn report(&self, line: &str) -> io::Result<()>;
}

/// Format a start/stop bracket report
pub(crate) fn span_line(
    site: CallSite,
    start_line: u32,
    stop_line: u32,
    thread: ThreadToken,
    nanos: u64,
) -> String {
    format!("[CLOCK]\t{site}\tlines {start_line}-{stop_line} [thread {thread:x}]:\t{nanos} ns")
}

/// Format a single-invocation report
pub(crate) fn call_line(
    file: &str,
    name: CalleeName,
    line: u32,
    thread: ThreadToken,
    nanos: u64,
) -> String {
    format!("[CLOCK]\t{file}::{name}\tline {line} [thread {thread:x}]:\t{nanos} ns")
}

/// Default sink: the process's standard error stream
///
/// Each report is a single `write_all` on the locked handle, so concurrent
/// reporters cannot interleave within a line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl ReportSink for StderrSink {
    fn report(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        io::stderr().lock().write_all(buf.as_bytes())
    }
}

/// Sink that discards every line
///
/// Useful when only the returned durations matter, and in benchmarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory sink for tests and embedders
///
/// Clones share one buffer, so a test can keep a handle and install its
/// clone on a service.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines reported so far, in arrival order
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// Number of lines reported so far
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    /// True when nothing has been reported yet
    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    /// Discard everything recorded so far
    pub fn clear(&self) {
        self.buffer().clear();
    }

    fn buffer(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ReportSink for MemorySink {
    fn report(&self, line: &str) -> io::Result<()> {
        self.buffer().push(line.to_owned());
        Ok(())
    }
}
