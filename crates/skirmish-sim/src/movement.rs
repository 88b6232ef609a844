//! Movement state machine
//!
//! Wraps a position/velocity holder with two states, `Idle` and `Moving`,
//! driven by a [`MovementProgress`] travel budget.

use crate::MovementProgress;
use serde::{Deserialize, Serialize};
use skirmish_core::{TimeMs, Vec2};

/// Movement states as a tagged sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum MoveState {
    Idle,
    Moving {
        dest: Vec2,
        progress: MovementProgress,
    },
}

/// Position/velocity holder with an Idle/Moving state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    position: Vec2,
    velocity: Vec2,
    state: MoveState,
}

impl Mover {
    /// Create a mover at rest
    ///
    /// # Panics
    ///
    /// Panics if `position` is not finite.
    pub fn new(position: Vec2) -> Self {
        assert!(position.is_finite(), "position must be finite");
        Self {
            position,
            velocity: Vec2::ZERO,
            state: MoveState::Idle,
        }
    }

    /// Begin moving toward `dest` with per-axis `velocity` (units/second)
    ///
    /// Always restarts from the current position: calling this while already
    /// moving overwrites the active movement, keeping only the position
    /// reached so far. Blocked/redirect handling relies on that overwrite.
    ///
    /// # Panics
    ///
    /// Panics if the velocity magnitude is zero.
    pub fn start_movement(&mut self, dest: Vec2, velocity: Vec2) {
        let speed = velocity.length();
        assert!(
            speed > 0.0 && speed.is_finite(),
            "movement requires a non-zero velocity"
        );
        self.velocity = velocity;
        self.state = MoveState::Moving {
            dest,
            progress: MovementProgress::between(self.position, dest, speed),
        };
    }

    /// Advance one tick
    ///
    /// In `Moving`, integrates the position along each axis until the travel
    /// budget is consumed, then settles on the destination and goes `Idle`.
    pub fn update(&mut self, delta: TimeMs) {
        if let MoveState::Moving { dest, progress } = &mut self.state {
            if !progress.advance(delta) {
                let dt = delta as f64 / 1000.0;
                self.position.x += self.velocity.x * dt;
                self.position.y += self.velocity.y * dt;
            } else {
                self.position = *dest;
                self.velocity = Vec2::ZERO;
                self.state = MoveState::Idle;
            }
        }
    }

    /// Roll back one tick applied by `update` (command-interrupt path)
    pub fn rewind(&mut self, delta: TimeMs) {
        if let MoveState::Moving { progress, .. } = &mut self.state {
            progress.reverse(delta);
            let dt = delta as f64 / 1000.0;
            self.position.x -= self.velocity.x * dt;
            self.position.y -= self.velocity.y * dt;
        }
    }

    /// Force `Idle`, abandoning any active movement
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.state = MoveState::Idle;
    }

    /// Whether a movement is active
    pub fn is_moving(&self) -> bool {
        matches!(self.state, MoveState::Moving { .. })
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity (zero while idle)
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// The active movement's destination, if any
    pub fn destination(&self) -> Option<Vec2> {
        match &self.state {
            MoveState::Moving { dest, .. } => Some(*dest),
            MoveState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_then_settles_on_destination() {
        let mut mover = Mover::new(Vec2::ZERO);
        mover.start_movement(Vec2::new(10.0, 0.0), Vec2::new(10.0, 0.0));
        assert!(mover.is_moving());

        mover.update(500);
        assert_eq!(mover.position(), Vec2::new(5.0, 0.0));
        assert!(mover.is_moving());

        // budget for 10 units at 10 units/sec is 1000 ms; going past it
        // settles exactly on the destination
        mover.update(600);
        assert_eq!(mover.position(), Vec2::new(10.0, 0.0));
        assert!(!mover.is_moving());
        assert_eq!(mover.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_restart_overwrites_active_movement() {
        let mut mover = Mover::new(Vec2::ZERO);
        mover.start_movement(Vec2::new(10.0, 0.0), Vec2::new(10.0, 0.0));
        mover.update(500);

        // redirect mid-flight: restarts from the position reached so far
        mover.start_movement(Vec2::new(5.0, 5.0), Vec2::new(0.0, 10.0));
        assert_eq!(mover.destination(), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(mover.position(), Vec2::new(5.0, 0.0));
        assert_eq!(mover.velocity(), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_rewind_undoes_one_tick() {
        let mut mover = Mover::new(Vec2::ZERO);
        mover.start_movement(Vec2::new(10.0, 0.0), Vec2::new(10.0, 0.0));
        mover.update(500);
        mover.rewind(500);
        assert_eq!(mover.position(), Vec2::ZERO);
        assert!(mover.is_moving());
    }

    #[test]
    fn test_stop() {
        let mut mover = Mover::new(Vec2::ZERO);
        mover.start_movement(Vec2::new(10.0, 0.0), Vec2::new(10.0, 0.0));
        mover.stop();
        assert!(!mover.is_moving());
        assert_eq!(mover.velocity(), Vec2::ZERO);
    }
}
