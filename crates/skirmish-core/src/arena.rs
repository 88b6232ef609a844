//! Entity id allocation
//!
//! Ids come from a monotonic counter plus a free-list of released slots.
//! The arena is passed explicitly to whatever spawns entities; there is no
//! global allocator.

use crate::EntityId;
use serde::{Deserialize, Serialize};

/// Allocator for entity ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdArena {
    next: u64,
    free: Vec<u64>,
}

impl IdArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id, reusing a released slot when one exists
    pub fn allocate(&mut self) -> EntityId {
        match self.free.pop() {
            Some(id) => EntityId(id),
            None => {
                let id = self.next;
                self.next += 1;
                EntityId(id)
            }
        }
    }

    /// Return an id to the pool once its entity is disposed
    pub fn release(&mut self, id: EntityId) {
        debug_assert!(
            id.0 < self.next && !self.free.contains(&id.0),
            "release of an id that is not live: {id}"
        );
        self.free.push(id.0);
    }

    /// Number of ids currently handed out
    pub fn live(&self) -> u64 {
        self.next - self.free.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_sequential() {
        let mut arena = IdArena::new();
        assert_eq!(arena.allocate(), EntityId::new(0));
        assert_eq!(arena.allocate(), EntityId::new(1));
        assert_eq!(arena.allocate(), EntityId::new(2));
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn test_release_and_reuse() {
        let mut arena = IdArena::new();
        let a = arena.allocate();
        let b = arena.allocate();
        arena.release(a);
        assert_eq!(arena.live(), 1);

        // released slot is reused before the counter advances
        assert_eq!(arena.allocate(), a);
        assert_eq!(arena.allocate(), EntityId::new(2));
        assert_ne!(b, a);
    }
}
