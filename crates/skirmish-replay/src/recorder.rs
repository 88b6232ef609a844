//! Tick input recording
//!
//! A session is fully determined by its starting scenario and the sequence
//! of per-tick hand-off inputs; recording those is enough for exact replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skirmish_core::{EntityId, Event, TimeMs};
use skirmish_sim::{Command, ScenarioDef, SimInput};

/// Inputs applied ahead of one tick, plus the tick's delta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Tick ordinal within the session, starting at zero
    pub tick: u64,
    /// The tick's simulated delta in milliseconds
    pub delta_ms: TimeMs,
    /// Hand-off inputs applied before the tick, in arrival order
    pub inputs: Vec<SimInput>,
}

/// A recorded session: everything needed to reproduce it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The scenario the simulation was built from
    pub scenario: ScenarioDef,
    /// Every tick, in order
    pub ticks: Vec<TickRecord>,
    /// When the recording was made
    pub recorded_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Number of recorded ticks
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    /// Total simulated time in milliseconds
    pub fn total_ms(&self) -> TimeMs {
        self.ticks.iter().map(|t| t.delta_ms).sum()
    }
}

/// Captures the inputs of a running session tick by tick
#[derive(Debug)]
pub struct Recorder {
    scenario: ScenarioDef,
    ticks: Vec<TickRecord>,
    pending: Vec<SimInput>,
}

impl Recorder {
    /// Start recording a session built from `scenario`
    pub fn new(scenario: ScenarioDef) -> Self {
        Self {
            scenario,
            ticks: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Record one hand-off input for the upcoming tick
    pub fn input(&mut self, input: SimInput) {
        self.pending.push(input);
    }

    /// Record a command for an agent
    pub fn command(&mut self, agent: EntityId, command: Command) {
        self.input(SimInput::Command { agent, command });
    }

    /// Record an interrupt for an agent
    pub fn interrupt(&mut self, agent: EntityId) {
        self.input(SimInput::Interrupt { agent });
    }

    /// Record a notification for an entity
    pub fn notify(&mut self, entity: EntityId, event: Event) {
        self.input(SimInput::Notify { entity, event });
    }

    /// Close the current tick with its delta
    ///
    /// Call this right after the simulation's own `update(delta)` so the
    /// record and the live run stay aligned.
    pub fn end_tick(&mut self, delta_ms: TimeMs) {
        let tick = self.ticks.len() as u64;
        self.ticks.push(TickRecord {
            tick,
            delta_ms,
            inputs: std::mem::take(&mut self.pending),
        });
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    /// Finish recording
    ///
    /// Inputs recorded after the last `end_tick` are discarded; they were
    /// never applied to a tick.
    pub fn finish(self) -> SessionRecord {
        SessionRecord {
            scenario: self.scenario,
            ticks: self.ticks,
            recorded_at: Utc::now(),
        }
    }
}
