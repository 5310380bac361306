#![forbid(unsafe_code)]

//! Deterministic time source.

use web_time::{Duration, Instant};

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy)]
pub struct TestClock {
    origin: Instant,
    elapsed: Duration,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    /// Time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Move forward by `ms` milliseconds and return the new time.
    pub fn advance_ms(&mut self, ms: u64) -> Instant {
        self.advance(Duration::from_millis(ms))
    }

    pub fn advance(&mut self, by: Duration) -> Instant {
        self.elapsed += by;
        self.now()
    }
}
