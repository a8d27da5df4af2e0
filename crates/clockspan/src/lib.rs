// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # clockspan
//!
//! Lightweight wall-clock timing for ad-hoc performance measurement during
//! development. Brackets of code or single callable invocations are timed on
//! the calling thread and reported immediately as one human-readable line
//! each; there is no aggregation, sampling, or persistence.
//!
//! ## Two measurement styles
//!
//! Bracket a region with [`clock_start!`] and [`clock_stop!`]. The pair is
//! keyed by source file and enclosing function, so the two macros may sit on
//! different lines, and brackets nest per thread in LIFO order:
//!
//! ```rust
//! use clockspan::{clock_start, clock_stop};
//!
//! fn rebuild_index(rows: &[u64]) -> u64 {
//!     clock_start!();
//!     let checksum = rows.iter().sum();
//!     let nanos = clock_stop!();
//!     println!("rebuild took {nanos} ns");
//!     checksum
//! }
//!
//! assert_eq!(rebuild_index(&[1, 2, 3]), 6);
//! ```
//!
//! Or time one invocation of a callable with [`clock!`], which binds the
//! callee and its arguments before the measured window opens:
//!
//! ```rust
//! use clockspan::clock;
//!
//! fn warm_cache(entries: usize) -> usize {
//!     entries * 2
//! }
//!
//! clock!(warm_cache, 16);        // reported as `warm_cache()`
//! clock!(|| warm_cache(8));      // reported as `lambda()`
//! ```
//!
//! ## Output
//!
//! Each completed measurement writes exactly one tab-separated line to the
//! report sink (stderr by default), with the thread id in lowercase hex:
//!
//! ```text
//! [CLOCK]	src/index.rs::app::rebuild_index	lines 4-6 [thread 1]:	1523 ns
//! [CLOCK]	src/main.rs::warm_cache()	line 12 [thread 1]:	87 ns
//! ```
//!
//! Both styles also return the elapsed nanoseconds for programmatic use. A
//! `clock_stop!` with no matching start evaluates to `0` and reports
//! nothing.
//!
//! ## The service
//!
//! The macros go through a process-wide [`ClockService`] that is lazily
//! created on first use. Install a configured one up front to change the
//! sink or opt into strict unmatched-stop warnings:
//!
//! ```rust
//! use clockspan::{ClockService, MemorySink, set_global};
//!
//! let sink = MemorySink::new();
//! let service = ClockService::builder()
//!     .with_sink(sink.clone())
//!     .with_strict(true)
//!     .build();
//! // Fails if anything was measured before this point.
//! let _ = set_global(service);
//! ```
//!
//! Tests and embedders can skip the global entirely: every operation is a
//! method on [`ClockService`], and [`MemorySink`] captures the lines.
//!
//! ## Concurrency and retention
//!
//! Everything runs on the invoking thread; nothing is spawned or buffered.
//! Threads never share interval stacks, so concurrent brackets at the same
//! call site cannot cross-pair. Per-(call site, thread) bookkeeping is kept
//! for the lifetime of the service once created, which bounds memory by the
//! number of distinct pairs rather than by measurement count.

pub mod error;
pub mod interval;
pub mod registry;
pub mod report;
pub mod service;
pub mod site;
pub mod thread_id;

mod macros;

// Re-exports for convenience
pub use error::{ClockError, ClockResult};
pub use interval::Interval;
pub use registry::SiteRegistry;
pub use report::{MemorySink, NullSink, ReportSink, StderrSink};
pub use service::{ClockService, ClockServiceBuilder, global, set_global};
pub use site::{CallSite, CalleeName};
pub use thread_id::ThreadToken;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
