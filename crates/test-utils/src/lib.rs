// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for clockspan
//!
//! This crate provides common testing components including:
//! - A parser for captured report lines
//! - Deterministic workloads with controllable duration
//!
//! It deliberately does not depend on `clockspan` itself, so the library can
//! consume it as a dev-dependency without a cycle.

pub mod fixtures;
pub mod report_parser;

// Re-exports for convenience
pub use fixtures::{checksum_of, scaled, sleep_ms, spin_for, sum_of_squares};
pub use report_parser::{LineRange, ParseError, ParsedReport, parse_report_line};
