//! Mediator seams between the core and the wider object graph
//!
//! State machines and commands never reach into the broader simulation
//! directly; everything crosses one of these traits. Hosts implement them
//! for their chosen object graph, the simulation provides the defaults it
//! needs itself.

use crate::config::WeaponSpec;
use skirmish_core::{Entity, EntityId, GroupId, RawEvent, Vec2};

/// Notified when an entity's operational status changes
pub trait LifecycleObserver: Send {
    /// A new entity joined the simulation
    fn object_created(&mut self, entity: &Entity);

    /// An entity was removed from the simulation
    fn object_destroyed(&mut self, entity: &Entity);
}

/// Observer for simulations nobody is watching
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl LifecycleObserver for NullObserver {
    fn object_created(&mut self, _entity: &Entity) {}

    fn object_destroyed(&mut self, _entity: &Entity) {}
}

/// Spawns and tracks projectiles on behalf of weapons
///
/// The weapon state machine only reports the shot; the spawner is solely
/// responsible for the resulting projectile entity.
pub trait ProjectileSpawner {
    fn create_projectile(
        &mut self,
        owner_group: GroupId,
        owner: EntityId,
        start: Vec2,
        target: Vec2,
        weapon: &WeaponSpec,
    );
}

/// Resolves a target entity to its current position
pub trait TargetLookup {
    fn position_of(&self, id: EntityId) -> Option<Vec2>;
}

/// Everything an entity may touch while executing one tick
pub struct TickContext<'a> {
    /// Start-of-tick positions for attack target resolution
    pub targets: &'a dyn TargetLookup,
    /// Projectile creation mediator
    pub projectiles: &'a mut dyn ProjectileSpawner,
    /// Lifecycle mediator
    pub lifecycle: &'a mut dyn LifecycleObserver,
    /// The tick's raw event stream, in emission order
    pub events: &'a mut Vec<RawEvent>,
}
