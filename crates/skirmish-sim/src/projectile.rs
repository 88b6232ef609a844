//! Projectile entities
//!
//! A projectile travels in a straight line from its launch point toward the
//! shot's target, never farther than the weapon's range. Reaching the
//! distance budget destroys it; a collision resolved by the engine arrives
//! as a `Destroyed` notification.

use crate::config::WeaponSpec;
use crate::dispatch::Dispatcher;
use crate::mediator::TickContext;
use crate::movement::Mover;
use serde::{Deserialize, Serialize};
use skirmish_core::{DefId, Entity, EntityId, Event, EventKind, GroupId, ObjectState, RawEvent, TimeMs, Vec2};

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    id: EntityId,
    group: GroupId,
    owner: EntityId,
    damage: f64,
    mover: Mover,
    dispatcher: Dispatcher,
    alive: bool,
}

impl Projectile {
    /// The projectile definition id
    pub const KIND: &'static str = "projectile";

    /// Build a projectile from a shot
    ///
    /// The flight path runs from `start` toward `target`, clamped to the
    /// weapon's range. A shot at the launch point itself produces a spent
    /// projectile that expires on its first update.
    pub fn from_shot(
        id: EntityId,
        owner_group: GroupId,
        owner: EntityId,
        start: Vec2,
        target: Vec2,
        weapon: &WeaponSpec,
        now: TimeMs,
    ) -> Self {
        let mut mover = Mover::new(start);
        let distance = start.distance(target);
        if distance > 0.0 {
            let direction = (target - start).scaled(1.0 / distance);
            let dest = if distance > weapon.range {
                start + direction.scaled(weapon.range)
            } else {
                target
            };
            mover.start_movement(dest, direction.scaled(weapon.projectile_speed));
        }
        Self {
            id,
            group: owner_group,
            owner,
            damage: weapon.damage,
            mover,
            dispatcher: Dispatcher::starting_at(now),
            alive: true,
        }
    }

    /// Deliver an out-of-band notification
    pub fn notify(&mut self, event: Event) {
        self.dispatcher.schedule(event);
    }

    /// One simulation tick
    pub fn update(&mut self, delta: TimeMs, ctx: &mut TickContext<'_>) {
        if !self.alive {
            return;
        }
        for event in self.dispatcher.advance(delta) {
            if let EventKind::Destroyed { .. } = event.kind {
                // collision resolved by the engine
                self.expire(ctx);
                return;
            }
        }

        self.mover.update(delta);
        if self.mover.is_moving() {
            let now = self.dispatcher.now();
            let dest = self.mover.destination().unwrap_or(self.mover.position());
            ctx.events.push(RawEvent::projectile(
                self.group,
                Event::moved(now, self.id, dest, self.mover.velocity()),
            ));
        } else {
            // distance budget consumed
            self.expire(ctx);
        }
    }

    fn expire(&mut self, ctx: &mut TickContext<'_>) {
        self.alive = false;
        self.mover.stop();
        let now = self.dispatcher.now();
        ctx.events.push(RawEvent::projectile(
            self.group,
            Event::destroyed(now, self.id, self.mover.position()),
        ));
        ctx.lifecycle.object_destroyed(&self.entity());
    }

    /// Snapshot of the projectile as an entity record
    pub fn entity(&self) -> Entity {
        let mut state = ObjectState::new(DefId::new(Self::KIND), self.mover.position(), 0.0);
        state.velocity = self.mover.velocity();
        Entity::new(self.id, self.group, state)
    }

    /// The projectile's id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The owner group (inherited from the shooter)
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// The agent that fired this projectile
    pub fn owner(&self) -> EntityId {
        self.owner
    }

    /// Damage applied when this projectile hits
    pub fn damage(&self) -> f64 {
        self.damage
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.mover.position()
    }

    /// Whether the projectile is still in flight
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediator::{LifecycleObserver, ProjectileSpawner, TargetLookup};

    struct NoTargets;

    impl TargetLookup for NoTargets {
        fn position_of(&self, _id: EntityId) -> Option<Vec2> {
            None
        }
    }

    struct NoShots;

    impl ProjectileSpawner for NoShots {
        fn create_projectile(
            &mut self,
            _owner_group: GroupId,
            _owner: EntityId,
            _start: Vec2,
            _target: Vec2,
            _weapon: &WeaponSpec,
        ) {
        }
    }

    #[derive(Default)]
    struct Destroyed(Vec<EntityId>);

    impl LifecycleObserver for Destroyed {
        fn object_created(&mut self, _entity: &Entity) {}

        fn object_destroyed(&mut self, entity: &Entity) {
            self.0.push(entity.id);
        }
    }

    fn tick(
        projectile: &mut Projectile,
        delta: TimeMs,
        destroyed: &mut Destroyed,
        events: &mut Vec<RawEvent>,
    ) {
        let mut no_shots = NoShots;
        let mut ctx = TickContext {
            targets: &NoTargets,
            projectiles: &mut no_shots,
            lifecycle: destroyed,
            events,
        };
        projectile.update(delta, &mut ctx);
    }

    fn spec() -> WeaponSpec {
        WeaponSpec {
            reload_ms: 900,
            projectile_speed: 10.0,
            damage: 10.0,
            range: 100.0,
        }
    }

    #[test]
    fn test_expires_at_distance_budget_exactly_once() {
        // 20 units at 10 units/sec: 2000 ms of flight
        let mut projectile = Projectile::from_shot(
            EntityId::new(5),
            GroupId::new(0),
            EntityId::new(1),
            Vec2::ZERO,
            Vec2::new(20.0, 0.0),
            &spec(),
            0,
        );
        let mut destroyed = Destroyed::default();
        let mut events = Vec::new();

        tick(&mut projectile, 1000, &mut destroyed, &mut events);
        assert!(projectile.is_alive());

        tick(&mut projectile, 1500, &mut destroyed, &mut events);
        assert!(!projectile.is_alive());
        assert_eq!(projectile.position(), Vec2::new(20.0, 0.0));
        assert_eq!(destroyed.0, vec![EntityId::new(5)]);

        // further updates change nothing
        tick(&mut projectile, 1000, &mut destroyed, &mut events);
        assert_eq!(destroyed.0.len(), 1);
    }

    #[test]
    fn test_flight_path_is_clamped_to_range() {
        let projectile = Projectile::from_shot(
            EntityId::new(5),
            GroupId::new(0),
            EntityId::new(1),
            Vec2::ZERO,
            Vec2::new(300.0, 0.0),
            &spec(),
            0,
        );
        // target is beyond the 100-unit range
        assert_eq!(projectile.damage(), 10.0);

        let mut projectile = projectile;
        let mut destroyed = Destroyed::default();
        let mut events = Vec::new();
        // 100 units at 10 units/sec expires just past 10 s
        tick(&mut projectile, 10_001, &mut destroyed, &mut events);
        assert!(!projectile.is_alive());
        assert_eq!(projectile.position(), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_destroyed_notification_ends_flight() {
        let mut projectile = Projectile::from_shot(
            EntityId::new(5),
            GroupId::new(0),
            EntityId::new(1),
            Vec2::ZERO,
            Vec2::new(50.0, 0.0),
            &spec(),
            0,
        );
        let mut destroyed = Destroyed::default();
        let mut events = Vec::new();

        projectile.notify(Event::destroyed(10, EntityId::new(5), Vec2::ZERO));
        tick(&mut projectile, 16, &mut destroyed, &mut events);

        assert!(!projectile.is_alive());
        assert_eq!(destroyed.0.len(), 1);
    }

    #[test]
    fn test_degenerate_shot_expires_immediately() {
        let mut projectile = Projectile::from_shot(
            EntityId::new(5),
            GroupId::new(0),
            EntityId::new(1),
            Vec2::ZERO,
            Vec2::ZERO,
            &spec(),
            0,
        );
        let mut destroyed = Destroyed::default();
        let mut events = Vec::new();

        tick(&mut projectile, 16, &mut destroyed, &mut events);
        assert!(!projectile.is_alive());
    }
}
