//! Agent commands and the bounded command queue

use serde::{Deserialize, Serialize};
use skirmish_core::{EntityId, Vec2};
use std::collections::VecDeque;

/// A typed instruction scoped to one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Do nothing. The idle command never completes and never blocks.
    Idle,
    /// Travel to `dest` with per-axis `speed` (units per second)
    Move { dest: Vec2, speed: Vec2 },
    /// Fire at `target` once the weapon allows it
    Attack { target: EntityId },
    /// Control: drop every queued command and the in-flight one
    ClearQueue,
    /// Control: resume the current command if it was stopped
    ResumeLast,
}

impl Command {
    /// Whether this is the idle command
    pub fn is_idle(&self) -> bool {
        matches!(self, Command::Idle)
    }

    /// Control commands act on the queue itself and are never queued
    pub fn is_control(&self) -> bool {
        matches!(self, Command::ClearQueue | Command::ResumeLast)
    }
}

/// Lifecycle of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandState {
    /// Taken from the queue, not yet executed
    Pending,
    /// Currently executing
    Executing,
    /// Finished; the agent takes the next command
    Done,
    /// Interrupted; resumable via `ResumeLast`
    Stopped,
}

/// Bounded FIFO of commands for one agent
///
/// Capacity is fixed at creation. Additions beyond capacity are rejected,
/// not queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
    capacity: usize,
}

impl CommandQueue {
    /// Create a queue with the given capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "command queue capacity must be non-zero");
        Self {
            commands: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a command. Returns `false` without enqueuing when full.
    pub fn push(&mut self, command: Command) -> bool {
        if self.commands.len() >= self.capacity {
            return false;
        }
        self.commands.push_back(command);
        true
    }

    /// Take the oldest queued command
    pub fn pop(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    /// Drop every queued command
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the queue is at capacity
    pub fn is_full(&self) -> bool {
        self.commands.len() >= self.capacity
    }

    /// The fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn move_to(x: f64) -> Command {
        Command::Move {
            dest: Vec2::new(x, 0.0),
            speed: Vec2::new(1.0, 0.0),
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new(4);
        assert!(queue.push(move_to(1.0)));
        assert!(queue.push(move_to(2.0)));

        assert_eq!(queue.pop(), Some(move_to(1.0)));
        assert_eq!(queue.pop(), Some(move_to(2.0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut queue = CommandQueue::new(3);
        assert!(queue.push(move_to(1.0)));
        assert!(queue.push(move_to(2.0)));
        assert!(queue.push(move_to(3.0)));
        assert!(queue.is_full());

        // the k+1-th command is rejected, the queue stays at k
        assert!(!queue.push(move_to(4.0)));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut queue = CommandQueue::new(3);
        queue.push(move_to(1.0));
        queue.push(move_to(2.0));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.push(move_to(3.0)));
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_is_fatal() {
        CommandQueue::new(0);
    }
}
