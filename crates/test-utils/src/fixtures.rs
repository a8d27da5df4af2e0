// Copyright (c) 2026 Clockspan Team
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Deterministic workloads for timing tests
//!
//! Small functions with predictable results and controllable duration.
//! The named ones double as label targets for named-callable tests.

use std::time::{Duration, Instant};

// ===== Delays =====

/// Busy-wait for at least `duration`.
///
/// Spinning keeps very short delays scheduler-independent, where `sleep`
/// would round up to a timer tick.
pub fn spin_for(duration: Duration) {
    let deadline = Instant::now() + duration;
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

/// Block the calling thread for `millis` milliseconds.
///
/// Guarantees only a lower bound on the elapsed time, like the underlying
/// `thread::sleep`.
pub fn sleep_ms(millis: u64) {
    std::thread::sleep(Duration::from_millis(millis));
}

// ===== Named workloads =====

/// Sum of squares below `n`
pub fn sum_of_squares(n: u64) -> u64 {
    (0..n).map(|i| i * i).sum()
}

/// Additive checksum over a byte buffer
pub fn checksum_of(bytes: Vec<u8>) -> u64 {
    bytes.iter().map(|&b| u64::from(b)).sum()
}

/// Product of two factors, for two-argument callable tests
pub fn scaled(value: u64, factor: u64) -> u64 {
    value * factor
}
