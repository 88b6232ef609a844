//! Time-ordered event dispatch
//!
//! Each simulated entity owns a [`Dispatcher`]: a store of pending
//! timestamped events plus a local millisecond clock. An event becomes
//! visible to the entity only once local time passes its timestamp; due
//! events are delivered in timestamp order, with insertion order as the
//! tie-break.

use serde::{Deserialize, Serialize};
use skirmish_core::{Event, TimeMs};

/// Per-entity store of pending timestamped events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dispatcher {
    now: TimeMs,
    pending: Vec<Event>,
}

impl Dispatcher {
    /// Create a dispatcher with local time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher whose local clock starts at `now`
    ///
    /// Entities spawned mid-simulation start at the simulation's current
    /// time so that timestamps line up.
    pub fn starting_at(now: TimeMs) -> Self {
        Self {
            now,
            pending: Vec::new(),
        }
    }

    /// Queue an event for delivery once local time reaches its timestamp
    ///
    /// An event whose timestamp is already due is delivered on the next
    /// `advance`. The stable sort keeps insertion order for equal
    /// timestamps.
    pub fn schedule(&mut self, event: Event) {
        self.pending.push(event);
        self.pending.sort_by_key(|e| e.timestamp);
    }

    /// Advance local time by `delta` and drain every event now due, in order
    pub fn advance(&mut self, delta: TimeMs) -> Vec<Event> {
        self.now = self.now.saturating_add(delta);
        let due = self.pending.partition_point(|e| e.timestamp <= self.now);
        self.pending.drain(..due).collect()
    }

    /// The entity's local time
    pub fn now(&self) -> TimeMs {
        self.now
    }

    /// Number of events not yet due
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
