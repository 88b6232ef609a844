//! Weapon reload state machine
//!
//! Two states gated by a reload timer. Unavailability is signaled purely
//! through the boolean return of [`Weapon::shoot`], never an error.

use crate::config::WeaponSpec;
use crate::mediator::ProjectileSpawner;
use serde::{Deserialize, Serialize};
use skirmish_core::{EntityId, GroupId, IntervalTimer, TimeMs, Vec2};

/// Reload states as a tagged sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum ReloadState {
    Reloaded,
    Reloading { timer: IntervalTimer },
}

/// A weapon that alternates between ready and reloading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    spec: WeaponSpec,
    state: ReloadState,
}

impl Weapon {
    /// Create a weapon, ready to fire
    ///
    /// # Panics
    ///
    /// Panics if the spec fails validation; an invalid weapon definition is
    /// a construction bug.
    pub fn new(spec: WeaponSpec) -> Self {
        spec.validate().expect("invalid weapon spec");
        Self {
            spec,
            state: ReloadState::Reloaded,
        }
    }

    /// Fire from `start` toward `target`
    ///
    /// Only effective while reloaded: delegates projectile creation to
    /// `spawner`, starts the reload timer, and returns `true`. While
    /// reloading this is a no-op returning `false`.
    pub fn shoot(
        &mut self,
        owner_group: GroupId,
        owner: EntityId,
        start: Vec2,
        target: Vec2,
        spawner: &mut dyn ProjectileSpawner,
    ) -> bool {
        match self.state {
            ReloadState::Reloaded => {
                spawner.create_projectile(owner_group, owner, start, target, &self.spec);
                self.state = ReloadState::Reloading {
                    timer: IntervalTimer::new(self.spec.reload_ms),
                };
                true
            }
            ReloadState::Reloading { .. } => false,
        }
    }

    /// Advance the reload timer; re-arms once the full interval has elapsed
    pub fn update(&mut self, delta: TimeMs) {
        if let ReloadState::Reloading { timer } = &mut self.state {
            if timer.advance(delta) {
                self.state = ReloadState::Reloaded;
            }
        }
    }

    /// Whether the weapon can fire right now
    pub fn is_reloaded(&self) -> bool {
        matches!(self.state, ReloadState::Reloaded)
    }

    /// The weapon's parameters
    pub fn spec(&self) -> &WeaponSpec {
        &self.spec
    }
}
