// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for clock operations
//!
//! This module defines the error types used throughout the crate.

use thiserror::Error;

use crate::site::CallSite;
use crate::thread_id::ThreadToken;

/// Result type alias for clock operations
pub type ClockResult<T> = Result<T, ClockError>;

/// Errors that can occur during clock operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// A stop was issued with no interval in flight for its call site
    #[error("no interval in flight for {location} on thread {thread:x}")]
    UnmatchedStop {
        /// Call site the stop was issued from
        location: CallSite,
        /// Thread the stop ran on
        thread: ThreadToken,
    },

    /// A process-wide default service was already installed
    #[error("global clock service already installed")]
    GlobalAlreadySet,
}
