//! Skirmish Core - shared types for the battle-simulation sync engine
//!
//! This crate provides the types every other skirmish crate builds on:
//! - Entity and group identifiers, plus the id arena that allocates them
//! - 2D vector math for positions and velocities
//! - Object state for simulated entities (agents, projectiles)
//! - The network-visible event model and the raw per-tick stream element
//! - Millisecond time and interval timers

mod arena;
mod event;
mod identity;
mod math;
mod object;
mod time;

pub use arena::IdArena;
pub use event::{Event, EventKind, RawEvent};
pub use identity::{DefId, EntityId, GroupId};
pub use math::Vec2;
pub use object::{Entity, ObjectState};
pub use time::{IntervalTimer, TimeMs};
