//! Timestamp source for the landmark detector.
//!
//! Video-mode detectors require non-decreasing timestamps, so production code
//! reads a monotonic clock and tests step a synthetic one.

use std::time::Instant;

/// Single "now" capability in milliseconds
pub trait Clock {
    /// Current timestamp; successive calls never go backwards
    fn now_ms(&mut self) -> u64;
}

/// Milliseconds elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock advancing by a fixed step on every read
#[derive(Debug, Clone, Copy)]
pub struct SteppingClock {
    next: u64,
    step: u64,
}

impl SteppingClock {
    #[must_use]
    pub const fn new(start: u64, step: u64) -> Self {
        Self { next: start, step }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&mut self) -> u64 {
        let now = self.next;
        self.next = self.next.saturating_add(self.step);
        now
    }
}
