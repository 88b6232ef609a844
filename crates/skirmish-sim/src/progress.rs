//! Movement progress tracking
//!
//! Answers one question: has the budgeted travel time been consumed? The
//! tracker is a distance budget, not a physics integrator: it never
//! computes interpolated coordinates. Positions are the movement state
//! machine's job.

use serde::{Deserialize, Serialize};
use skirmish_core::{TimeMs, Vec2};

/// Elapsed-time accumulator against a distance budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementProgress {
    distance: f64,
    speed_per_ms: f64,
    elapsed_ms: f64,
}

impl MovementProgress {
    /// Track progress along the straight path from `start` to `end`.
    /// `speed` is in units per second.
    ///
    /// # Panics
    ///
    /// Panics if `speed` is not strictly positive and finite.
    pub fn between(start: Vec2, end: Vec2, speed: f64) -> Self {
        Self::over_distance(start.distance(end), speed)
    }

    /// Track progress over an explicit path length
    ///
    /// # Panics
    ///
    /// Panics if `distance` is negative or not finite, or if `speed` is not
    /// strictly positive and finite.
    pub fn over_distance(distance: f64, speed: f64) -> Self {
        assert!(
            distance >= 0.0 && distance.is_finite(),
            "path length must be non-negative"
        );
        assert!(
            speed > 0.0 && speed.is_finite(),
            "speed must be strictly positive"
        );
        Self {
            distance,
            speed_per_ms: speed / 1000.0,
            elapsed_ms: 0.0,
        }
    }

    /// Consume `delta` milliseconds of travel time
    ///
    /// Returns `true` once the accumulated time strictly exceeds the
    /// distance budget; reaching the budget exactly is not yet arrival.
    pub fn advance(&mut self, delta: TimeMs) -> bool {
        self.elapsed_ms += delta as f64;
        self.arrived()
    }

    /// Roll back `delta` milliseconds of travel time (an interrupted tick),
    /// saturating at zero
    pub fn reverse(&mut self, delta: TimeMs) {
        self.elapsed_ms = (self.elapsed_ms - delta as f64).max(0.0);
    }

    /// Whether the travel budget has been consumed
    pub fn arrived(&self) -> bool {
        self.elapsed_ms * self.speed_per_ms > self.distance
    }

    /// The total path length
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Accumulated travel time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}
