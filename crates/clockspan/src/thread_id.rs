// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Process-local thread identity
//!
//! Report lines tag each measurement with the thread it ran on. Tokens are
//! assigned from a process-local counter on a thread's first measurement and
//! cached for the thread's lifetime, so they are never reused within a
//! process. The value `0` is reserved and never assigned.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Reserved for environments without a thread identity. Never assigned.
const NO_THREAD: u64 = 0;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(NO_THREAD + 1);

thread_local! {
    /// Token cached on first use by each thread
    static CURRENT: Cell<Option<ThreadToken>> = Cell::new(None);
}

/// Process-assigned identity of a thread
///
/// Rendered as lowercase hexadecimal without a `0x` prefix in report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadToken(u64);

impl ThreadToken {
    /// Token of the calling thread, assigning one on first use
    pub fn current() -> Self {
        CURRENT.with(|cell| match cell.get() {
            Some(token) => token,
            None => {
                let token = ThreadToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
                cell.set(Some(token));
                token
            }
        })
    }

    /// Raw numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::LowerHex for ThreadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_stable_within_thread() {
        assert_eq!(ThreadToken::current(), ThreadToken::current());
    }

    #[test]
    fn test_tokens_distinct_across_threads() {
        let here = ThreadToken::current();
        let there = std::thread::spawn(ThreadToken::current).join().unwrap();
        assert_ne!(here, there);
    }

    #[test]
    fn test_token_is_never_the_reserved_value() {
        assert_ne!(ThreadToken::current().get(), NO_THREAD);
    }

    #[test]
    fn test_lower_hex_rendering() {
        assert_eq!(format!("{:x}", ThreadToken(255)), "ff");
        assert_eq!(format!("{:x}", ThreadToken(4096)), "1000");
    }
}
