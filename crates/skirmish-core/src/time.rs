//! Millisecond time and interval timers

use serde::{Deserialize, Serialize};

/// Simulation time in milliseconds
pub type TimeMs = u64;

/// Accumulates elapsed time against a fixed interval
///
/// Used wherever a state machine waits out a duration (weapon reloads).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    interval: TimeMs,
    elapsed: TimeMs,
}

impl IntervalTimer {
    /// Create a timer that elapses after `interval` milliseconds
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn new(interval: TimeMs) -> Self {
        assert!(interval > 0, "timer interval must be non-zero");
        Self {
            interval,
            elapsed: 0,
        }
    }

    /// Accumulate `delta` milliseconds; returns whether the interval has
    /// fully elapsed
    pub fn advance(&mut self, delta: TimeMs) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.is_elapsed()
    }

    /// Whether the full interval has elapsed
    pub fn is_elapsed(&self) -> bool {
        self.elapsed >= self.interval
    }

    /// Start the interval over
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// The configured interval
    pub fn interval(&self) -> TimeMs {
        self.interval
    }

    /// Milliseconds left until the interval elapses
    pub fn remaining(&self) -> TimeMs {
        self.interval.saturating_sub(self.elapsed)
    }
}
