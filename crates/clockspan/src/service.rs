// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Clock service: registry, sink, and stop policy in one handle
//!
//! A [`ClockService`] owns the interval registry and the report sink. The
//! macros go through the process-wide default returned by [`global`];
//! embedders and tests construct their own via [`ClockService::builder`] and
//! call the methods directly.

use std::sync::OnceLock;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{ClockError, ClockResult};
use crate::interval::elapsed_nanos;
use crate::registry::SiteRegistry;
use crate::report::{ReportSink, StderrSink, call_line, span_line};
use crate::site::{CallSite, CalleeName};
use crate::thread_id::ThreadToken;

static GLOBAL: OnceLock<ClockService> = OnceLock::new();

/// Process-wide default service used by the macros.
///
/// Lazily initialized to [`ClockService::new`] on first use unless
/// [`set_global`] installed a configured one earlier.
pub fn global() -> &'static ClockService {
    GLOBAL.get_or_init(ClockService::new)
}

/// Install `service` as the process-wide default.
///
/// Fails with [`ClockError::GlobalAlreadySet`] once any default exists,
/// whether installed here or lazily created by [`global`]; the rejected
/// service is dropped. Install before the first measurement, typically at
/// the top of `main`.
pub fn set_global(service: ClockService) -> ClockResult<()> {
    GLOBAL.set(service).map_err(|_| ClockError::GlobalAlreadySet)
}

/// Measures elapsed wall-clock time between paired points or around one
/// callable invocation, reporting each result as it completes
pub struct ClockService {
    registry: SiteRegistry,
    sink: Box<dyn ReportSink>,
    strict: bool,
}

impl ClockService {
    /// Service with the stderr sink and lenient unmatched-stop handling
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a service
    pub fn builder() -> ClockServiceBuilder {
        ClockServiceBuilder::new()
    }

    /// Begin an interval for `site` on the calling thread.
    ///
    /// `line` is the source line the bracket opens on; it reappears in the
    /// report of the matching [`stop`](Self::stop). The start instant is
    /// captured after registry traversal, so lookup cost stays outside the
    /// measured window.
    pub fn start(&self, site: CallSite, line: u32) {
        let thread = ThreadToken::current();
        self.registry.push(site, thread, line);
    }

    /// End the most recent interval for `site` on the calling thread,
    /// report it, and return the elapsed nanoseconds.
    ///
    /// A stop with no interval in flight returns `0` and reports nothing.
    /// In strict mode it additionally logs a warning; the return contract
    /// is unchanged.
    pub fn stop(&self, site: CallSite, line: u32) -> u64 {
        match self.try_stop(site, line) {
            Ok(nanos) => nanos,
            Err(error) => {
                if self.strict {
                    warn!("unmatched clock stop: {}", error);
                }
                0
            }
        }
    }

    /// Like [`stop`](Self::stop), surfacing an unmatched stop to the caller
    /// instead of flattening it to `0`.
    pub fn try_stop(&self, site: CallSite, line: u32) -> ClockResult<u64> {
        // End of the measured window; everything below is bookkeeping.
        let end = Instant::now();
        let thread = ThreadToken::current();
        let interval = self
            .registry
            .pop(site, thread)
            .ok_or(ClockError::UnmatchedStop {
                location: site,
                thread,
            })?;
        let nanos = elapsed_nanos(interval.started(), end);
        self.emit(span_line(site, interval.line(), line, thread, nanos));
        Ok(nanos)
    }

    /// Time one invocation of `f`, report it, and return the elapsed
    /// nanoseconds.
    ///
    /// `f` runs exactly once, synchronously; its return value is discarded.
    /// Bind arguments before calling so setup cost stays outside the window
    /// (the [`clock!`](crate::clock) macro does this). A panic in `f`
    /// propagates and nothing is reported.
    pub fn measure<R>(
        &self,
        file: &'static str,
        line: u32,
        name: CalleeName,
        f: impl FnOnce() -> R,
    ) -> u64 {
        let thread = ThreadToken::current();
        let start = Instant::now();
        let _ = f();
        let end = Instant::now();
        let nanos = elapsed_nanos(start, end);
        self.emit(call_line(file, name, line, thread, nanos));
        nanos
    }

    fn emit(&self, line: String) {
        // The measurement already succeeded by the time we report it; a
        // closed or failing sink must not turn it into an error.
        if let Err(error) = self.sink.report(&line) {
            debug!("report sink write failed: {}", error);
        }
    }
}

impl Default for ClockService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ClockService`]
pub struct ClockServiceBuilder {
    sink: Box<dyn ReportSink>,
    strict: bool,
}

impl ClockServiceBuilder {
    fn new() -> Self {
        Self {
            sink: Box::new(StderrSink),
            strict: false,
        }
    }

    /// Replace the report sink (stderr by default)
    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Log a warning on every unmatched stop
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the service
    pub fn build(self) -> ClockService {
        ClockService {
            registry: SiteRegistry::new(),
            sink: self.sink,
            strict: self.strict,
        }
    }
}
