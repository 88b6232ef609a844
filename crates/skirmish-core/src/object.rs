//! Object state for simulated entities

use crate::{DefId, EntityId, GroupId, Vec2};
use serde::{Deserialize, Serialize};

/// Mutable state shared by every simulated object
///
/// Mutated only by the owning entity's state machines or the command it is
/// currently executing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    /// The object's type
    pub kind: DefId,
    /// Current position
    pub position: Vec2,
    /// Current velocity (units per second)
    pub velocity: Vec2,
    /// Collision size
    pub size: f64,
}

impl ObjectState {
    /// Create a new object state at rest
    ///
    /// # Panics
    ///
    /// Panics if `size` is negative or `position` is not finite; these are
    /// construction bugs, not runtime conditions.
    pub fn new(kind: impl Into<DefId>, position: Vec2, size: f64) -> Self {
        assert!(size >= 0.0, "object size must be non-negative");
        assert!(position.is_finite(), "object position must be finite");
        Self {
            kind: kind.into(),
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }
}

/// A simulated entity: stable id, owning group, mutable object state
///
/// An entity is owned by exactly one group for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub group: GroupId,
    pub state: ObjectState,
}

impl Entity {
    /// Create a new entity
    pub fn new(id: EntityId, group: GroupId, state: ObjectState) -> Self {
        Self { id, group, state }
    }
}
