//! Event stream compaction
//!
//! One tick produces a raw, chronological event stream per observer group.
//! An entity traveling in a straight line at constant velocity emits many
//! small movement events per synchronization interval, but a receiver that
//! interpolates continuously only needs the final destination and velocity.
//! The compactor merges consecutive movement events of one entity while
//! their velocity stays identical, and preserves every event's position in
//! the overall output ordering relative to the rest of the stream.
//!
//! Ordering relies on reserved indices, not append order: an entry opened
//! for a movement run remembers the output position its single flushed
//! event must land on: the position the first event of the run would have
//! taken had it not been cached. Without this, a terminal event arriving
//! late for one entity could overtake another entity's earlier movement
//! run.

use crate::batch::{Category, EventBatch};
use indexmap::IndexMap;
use skirmish_core::{EntityId, Event, EventKind, TimeMs, Vec2};
use std::collections::BTreeMap;

/// Open movement run for one entity
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Output index reserved for the run's flushed event
    reserved: usize,
    /// Timestamp of the first event of the run
    start_time: TimeMs,
    /// Last destination seen
    dest: Vec2,
    /// Velocity shared by the whole run
    velocity: Vec2,
}

/// Movement-coalescing compactor for one observer group's tick stream
///
/// Feed the tick's raw events through [`add_event`](Self::add_event) in
/// order, then call [`build`](Self::build) once per tick.
#[derive(Debug, Default)]
pub struct Compactor {
    /// Directly-appended events (never movement runs)
    events: Vec<Event>,
    /// Flushed movement events waiting at their reserved index
    finalized: BTreeMap<usize, Event>,
    /// Open runs per entity category
    agents: IndexMap<EntityId, CacheEntry>,
    enemies: IndexMap<EntityId, CacheEntry>,
    projectiles: IndexMap<EntityId, CacheEntry>,
}

impl Compactor {
    /// Create an empty compactor
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw event
    pub fn add_event(&mut self, category: Category, event: Event) {
        match event.kind {
            EventKind::Moved { dest, velocity } => {
                self.add_movement(category, event.subject, event.timestamp, dest, velocity)
            }
            _ => self.add_plain(category, event),
        }
    }

    /// Finalize the tick
    ///
    /// Flushes every still-open run at its reserved index, splices the
    /// flushed events into the output at their reserved positions, and
    /// clears all state for the next tick. Returns `None` when the combined
    /// result is empty (nothing to send, rather than an empty container).
    pub fn build(&mut self) -> Option<EventBatch> {
        for (subject, entry) in std::mem::take(&mut self.agents) {
            self.flush_entry(subject, entry);
        }
        for (subject, entry) in std::mem::take(&mut self.enemies) {
            self.flush_entry(subject, entry);
        }
        for (subject, entry) in std::mem::take(&mut self.projectiles) {
            self.flush_entry(subject, entry);
        }

        let mut events = std::mem::take(&mut self.events);
        for (index, event) in std::mem::take(&mut self.finalized) {
            // ascending insertion keeps every reserved index in bounds
            debug_assert!(index <= events.len(), "reserved index out of bounds");
            events.insert(index, event);
        }

        if events.is_empty() {
            None
        } else {
            Some(EventBatch::new(events))
        }
    }

    /// Number of open movement runs across all categories
    fn open_entries(&self) -> usize {
        self.agents.len() + self.enemies.len() + self.projectiles.len()
    }

    fn cache(&mut self, category: Category) -> &mut IndexMap<EntityId, CacheEntry> {
        match category {
            Category::Agent => &mut self.agents,
            Category::Enemy => &mut self.enemies,
            Category::Projectile => &mut self.projectiles,
        }
    }

    fn add_movement(
        &mut self,
        category: Category,
        subject: EntityId,
        timestamp: TimeMs,
        dest: Vec2,
        velocity: Vec2,
    ) {
        match self.cache(category).shift_remove(&subject) {
            Some(mut entry) if entry.velocity == velocity => {
                // same straight-line run: only the destination moves
                entry.dest = dest;
                self.cache(category).insert(subject, entry);
            }
            Some(entry) => {
                // velocity changed: close the old run, open a fresh one
                self.flush_entry(subject, entry);
                self.open_entry(category, subject, timestamp, dest, velocity);
            }
            None => self.open_entry(category, subject, timestamp, dest, velocity),
        }
    }

    fn add_plain(&mut self, category: Category, event: Event) {
        // any non-movement event for the subject ends its open run; letting
        // it through without flushing would reorder it against the movement
        // that preceded it
        if let Some(entry) = self.cache(category).shift_remove(&event.subject) {
            self.flush_entry(event.subject, entry);
        }
        // idempotence: a value already recorded is dropped, not repeated
        if self.events.contains(&event) {
            return;
        }
        self.events.push(event);
    }

    /// Open a run, reserving the output position its flushed event will
    /// take: where the event would have landed had it not been cached.
    /// Every item recorded so far (appended, flushed, or still open)
    /// occupies one earlier output position.
    fn open_entry(
        &mut self,
        category: Category,
        subject: EntityId,
        timestamp: TimeMs,
        dest: Vec2,
        velocity: Vec2,
    ) {
        let reserved = self.events.len() + self.finalized.len() + self.open_entries();
        self.cache(category).insert(
            subject,
            CacheEntry {
                reserved,
                start_time: timestamp,
                dest,
                velocity,
            },
        );
    }

    /// Materialize a run as a single movement event at its reserved index:
    /// the last destination with the first timestamp
    fn flush_entry(&mut self, subject: EntityId, entry: CacheEntry) {
        let event = Event::moved(entry.start_time, subject, entry.dest, entry.velocity);
        self.finalized.insert(entry.reserved, event);
    }
}
