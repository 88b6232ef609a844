//! The compacted per-tick batch delivered to an observer

use serde::{Deserialize, Serialize};
use skirmish_core::Event;

/// Entity category from one observer's point of view
///
/// Movement runs are tracked separately per category so an agent id and a
/// projectile id can never collide in the compaction cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// One of the observer's own agents
    Agent,
    /// An agent of another group, as observed
    Enemy,
    /// A projectile, whoever fired it
    Projectile,
}

/// Ordered, compacted events for one observer and one tick
///
/// Built only when there is something to send; an empty batch is never
/// constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    events: Vec<Event>,
}

impl EventBatch {
    /// Wrap a non-empty, already-ordered event list
    pub(crate) fn new(events: Vec<Event>) -> Self {
        debug_assert!(!events.is_empty(), "an event batch is never empty");
        Self { events }
    }

    /// The events, in causal order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events in the batch
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the batch holds no events (never true for a built batch)
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the batch
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
