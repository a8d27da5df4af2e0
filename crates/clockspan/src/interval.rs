// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! In-flight measurement state

use std::time::Instant;

/// One in-flight measurement: the instant a bracket was started and the
/// source line it was started on.
///
/// Padded to a cache-line boundary so adjacent stack entries touched by
/// different threads do not share a line. This is a performance hint only;
/// results are identical without it.
#[derive(Debug, Clone, Copy)]
#[repr(align(64))]
pub struct Interval {
    started: Instant,
    line: u32,
}

impl Interval {
    /// Capture the current instant for a bracket starting on `line`.
    ///
    /// Callers run this after any lookup work so that bookkeeping cost
    /// stays outside the measured window.
    pub fn begin(line: u32) -> Self {
        Self {
            started: Instant::now(),
            line,
        }
    }

    /// Re-capture the start instant, replacing the one from
    /// [`begin`](Self::begin).
    ///
    /// The registry calls this once the interval sits on its stack, so the
    /// insertion itself is never part of the measured window.
    pub(crate) fn restart(&mut self) {
        self.started = Instant::now();
    }

    /// Instant the bracket was started
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Source line the bracket was started on
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Nanoseconds from `start` to `end`, saturating at both ends.
///
/// An `end` earlier than `start` yields 0 rather than a panic, and spans
/// beyond `u64` range (around 584 years) clamp to `u64::MAX`.
pub(crate) fn elapsed_nanos(start: Instant, end: Instant) -> u64 {
    u64::try_from(end.saturating_duration_since(start).as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_interval_records_line() {
        let interval = Interval::begin(42);
        assert_eq!(interval.line(), 42);
    }

    #[test]
    fn test_interval_is_cache_line_aligned() {
        assert_eq!(std::mem::align_of::<Interval>(), 64);
    }

    #[test]
    fn test_restart_moves_the_start_forward() {
        let mut interval = Interval::begin(7);
        let initial = interval.started();

        std::thread::sleep(Duration::from_millis(2));
        interval.restart();

        assert!(interval.started() > initial);
        assert_eq!(interval.line(), 7);
    }

    #[test]
    fn test_elapsed_nanos_forward() {
        let start = Instant::now();
        let end = start + Duration::from_nanos(1500);
        assert_eq!(elapsed_nanos(start, end), 1500);
    }

    #[test]
    fn test_elapsed_nanos_backward_is_zero() {
        let end = Instant::now();
        let start = end + Duration::from_millis(1);
        assert_eq!(elapsed_nanos(start, end), 0);
    }
}
