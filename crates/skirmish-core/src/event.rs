//! Network-visible event model
//!
//! Events are immutable values totally ordered by timestamp; equal
//! timestamps keep their insertion order wherever events are stored. Two
//! events are "the same event" only when the whole value is equal.

use crate::{DefId, EntityId, GroupId, TimeMs, Vec2};
use serde::{Deserialize, Serialize};

/// What happened to the subject entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Set off toward `dest` at `velocity` (units per second)
    Moved { dest: Vec2, velocity: Vec2 },
    /// Stopped short of its destination
    Blocked { position: Vec2 },
    /// Left the observable area
    Gone { position: Vec2 },
    /// Took damage
    Hit { damage: f64, position: Vec2 },
    /// Removed from the simulation
    Destroyed { position: Vec2 },
    /// Fired a projectile from `start` toward `target`
    Shot { start: Vec2, target: Vec2 },
    /// Appeared in the simulation
    Spawned { kind: DefId, position: Vec2 },
}

impl EventKind {
    /// Whether this kind participates in movement coalescing
    pub fn is_movement(&self) -> bool {
        matches!(self, EventKind::Moved { .. })
    }
}

/// An immutable event record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When the event happened, in simulation milliseconds
    pub timestamp: TimeMs,
    /// The entity the event is about
    pub subject: EntityId,
    /// What happened
    pub kind: EventKind,
}

impl Event {
    /// Create a new event
    pub fn new(timestamp: TimeMs, subject: EntityId, kind: EventKind) -> Self {
        Self {
            timestamp,
            subject,
            kind,
        }
    }

    /// A movement event
    pub fn moved(timestamp: TimeMs, subject: EntityId, dest: Vec2, velocity: Vec2) -> Self {
        Self::new(timestamp, subject, EventKind::Moved { dest, velocity })
    }

    /// A blocked event
    pub fn blocked(timestamp: TimeMs, subject: EntityId, position: Vec2) -> Self {
        Self::new(timestamp, subject, EventKind::Blocked { position })
    }

    /// A gone event
    pub fn gone(timestamp: TimeMs, subject: EntityId, position: Vec2) -> Self {
        Self::new(timestamp, subject, EventKind::Gone { position })
    }

    /// A hit event
    pub fn hit(timestamp: TimeMs, subject: EntityId, damage: f64, position: Vec2) -> Self {
        Self::new(timestamp, subject, EventKind::Hit { damage, position })
    }

    /// A destroyed event
    pub fn destroyed(timestamp: TimeMs, subject: EntityId, position: Vec2) -> Self {
        Self::new(timestamp, subject, EventKind::Destroyed { position })
    }

    /// A shot event
    pub fn shot(timestamp: TimeMs, subject: EntityId, start: Vec2, target: Vec2) -> Self {
        Self::new(timestamp, subject, EventKind::Shot { start, target })
    }

    /// A spawned event
    pub fn spawned(
        timestamp: TimeMs,
        subject: EntityId,
        kind: impl Into<DefId>,
        position: Vec2,
    ) -> Self {
        Self::new(
            timestamp,
            subject,
            EventKind::Spawned {
                kind: kind.into(),
                position,
            },
        )
    }

    /// Whether this event participates in movement coalescing
    pub fn is_movement(&self) -> bool {
        self.kind.is_movement()
    }
}

/// One element of the raw per-tick stream, tagged with enough provenance
/// for per-observer classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// The group the subject belongs to (a projectile's owner group)
    pub origin: GroupId,
    /// Whether the subject is a projectile rather than an agent
    pub from_projectile: bool,
    /// The event itself
    pub event: Event,
}

impl RawEvent {
    /// A raw event whose subject is an agent
    pub fn agent(origin: GroupId, event: Event) -> Self {
        Self {
            origin,
            from_projectile: false,
            event,
        }
    }

    /// A raw event whose subject is a projectile
    pub fn projectile(origin: GroupId, event: Event) -> Self {
        Self {
            origin,
            from_projectile: true,
            event,
        }
    }
}
