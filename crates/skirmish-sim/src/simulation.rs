//! The per-group authoritative simulation container
//!
//! One `Simulation` owns its id arena, agents, and projectiles, and runs a
//! single-writer tick: drain hand-off inputs, update every entity, spawn
//! the projectiles requested through the mediator, and return the tick's
//! raw event stream in chronological order. Every transition is
//! deterministic given the same input sequence.

use crate::agent::Agent;
use crate::command::Command;
use crate::config::{AgentSpec, ScenarioDef, WeaponSpec};
use crate::error::{Error, Result};
use crate::mediator::{LifecycleObserver, NullObserver, ProjectileSpawner, TargetLookup, TickContext};
use crate::projectile::Projectile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use skirmish_core::{EntityId, Event, GroupId, IdArena, RawEvent, TimeMs, Vec2};

/// One hand-off input applied to a simulation before a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimInput {
    /// Queue a command for an agent
    Command { agent: EntityId, command: Command },
    /// Preempt an agent's current command
    Interrupt { agent: EntityId },
    /// Deliver an out-of-band notification to an entity
    Notify { entity: EntityId, event: Event },
}

/// Start-of-tick positions, used for attack target resolution
struct PositionTable {
    positions: IndexMap<EntityId, Vec2>,
}

impl PositionTable {
    fn of_agents(agents: &IndexMap<EntityId, Agent>) -> Self {
        Self {
            positions: agents
                .values()
                .filter(|a| a.is_alive())
                .map(|a| (a.id(), a.position()))
                .collect(),
        }
    }
}

impl TargetLookup for PositionTable {
    fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.positions.get(&id).copied()
    }
}

/// A shot reported through the projectile mediator during the agent pass
#[derive(Debug, Clone)]
struct PendingShot {
    owner_group: GroupId,
    owner: EntityId,
    start: Vec2,
    target: Vec2,
    weapon: WeaponSpec,
}

/// Collects shot requests so the simulation can materialize them after the
/// agent pass, keeping the tick single-writer
#[derive(Debug, Default)]
struct ShotCollector {
    shots: Vec<PendingShot>,
}

impl ShotCollector {
    fn take(&mut self) -> Vec<PendingShot> {
        std::mem::take(&mut self.shots)
    }
}

impl ProjectileSpawner for ShotCollector {
    fn create_projectile(
        &mut self,
        owner_group: GroupId,
        owner: EntityId,
        start: Vec2,
        target: Vec2,
        weapon: &WeaponSpec,
    ) {
        self.shots.push(PendingShot {
            owner_group,
            owner,
            start,
            target,
            weapon: weapon.clone(),
        });
    }
}

/// The authoritative simulation for one server or observer group
pub struct Simulation {
    arena: IdArena,
    agents: IndexMap<EntityId, Agent>,
    projectiles: IndexMap<EntityId, Projectile>,
    lifecycle: Box<dyn LifecycleObserver>,
    pending_events: Vec<RawEvent>,
    now: TimeMs,
}

impl Simulation {
    /// Create an empty simulation with no lifecycle observer
    pub fn new() -> Self {
        Self::with_observer(Box::new(NullObserver))
    }

    /// Create an empty simulation reporting lifecycle changes to `observer`
    pub fn with_observer(observer: Box<dyn LifecycleObserver>) -> Self {
        Self {
            arena: IdArena::new(),
            agents: IndexMap::new(),
            projectiles: IndexMap::new(),
            lifecycle: observer,
            pending_events: Vec::new(),
            now: 0,
        }
    }

    /// Build a simulation from a validated scenario
    ///
    /// Agents are spawned in definition order, so entity ids are
    /// deterministic for a given scenario.
    pub fn from_scenario(scenario: &ScenarioDef) -> Result<Self> {
        scenario.validate()?;
        let mut simulation = Self::new();
        for group in &scenario.groups {
            for placement in &group.agents {
                simulation.spawn_agent(group.group(), &placement.spec, placement.position);
            }
        }
        Ok(simulation)
    }

    /// Spawn an agent, reporting it created
    pub fn spawn_agent(&mut self, group: GroupId, spec: &AgentSpec, position: Vec2) -> EntityId {
        let id = self.arena.allocate();
        let agent = Agent::new(id, group, spec, position, self.now);
        self.lifecycle.object_created(&agent.entity());
        self.pending_events.push(RawEvent::agent(
            group,
            Event::spawned(self.now, id, spec.kind.clone(), position),
        ));
        self.agents.insert(id, agent);
        id
    }

    /// Queue a command for an agent
    ///
    /// Returns `Ok(false)` when the agent's queue rejected the command.
    pub fn add_command(&mut self, agent: EntityId, command: Command) -> Result<bool> {
        match self.agents.get_mut(&agent) {
            Some(a) => Ok(a.add_command(command)),
            None => Err(Error::UnknownEntity(agent)),
        }
    }

    /// Drop an agent's queued commands and its in-flight progress
    pub fn clear_commands(&mut self, agent: EntityId) -> Result<()> {
        self.add_command(agent, Command::ClearQueue).map(|_| ())
    }

    /// Preempt an agent's current command (e.g. a collision), reporting the
    /// stop on the raw stream
    pub fn interrupt(&mut self, agent: EntityId) -> Result<()> {
        match self.agents.get_mut(&agent) {
            Some(a) => {
                a.command_interrupted();
                self.pending_events.push(RawEvent::agent(
                    a.group(),
                    Event::blocked(self.now, a.id(), a.position()),
                ));
                Ok(())
            }
            None => Err(Error::UnknownEntity(agent)),
        }
    }

    /// Deliver an out-of-band notification to an entity
    pub fn notify(&mut self, entity: EntityId, event: Event) -> Result<()> {
        if let Some(agent) = self.agents.get_mut(&entity) {
            agent.notify(event);
            return Ok(());
        }
        if let Some(projectile) = self.projectiles.get_mut(&entity) {
            projectile.notify(event);
            return Ok(());
        }
        Err(Error::UnknownEntity(entity))
    }

    /// Apply one hand-off input
    ///
    /// Inputs addressed to entities that died mid-flight are dropped; that is
    /// a normal race at the hand-off boundary, not an error the tick loop
    /// can act on.
    pub fn apply(&mut self, input: SimInput) -> Result<()> {
        match input {
            SimInput::Command { agent, command } => {
                self.add_command(agent, command).map(|_| ())
            }
            SimInput::Interrupt { agent } => self.interrupt(agent),
            SimInput::Notify { entity, event } => self.notify(entity, event),
        }
    }

    /// Advance the simulation by one tick of `delta` milliseconds
    ///
    /// Returns the tick's raw event stream in emission order.
    pub fn update(&mut self, delta: TimeMs) -> Vec<RawEvent> {
        self.now += delta;

        let mut events = std::mem::take(&mut self.pending_events);
        let targets = PositionTable::of_agents(&self.agents);
        let mut shots = ShotCollector::default();

        for agent in self.agents.values_mut() {
            let mut ctx = TickContext {
                targets: &targets,
                projectiles: &mut shots,
                lifecycle: &mut *self.lifecycle,
                events: &mut events,
            };
            agent.update(delta, &mut ctx);
        }

        for projectile in self.projectiles.values_mut() {
            let mut ctx = TickContext {
                targets: &targets,
                projectiles: &mut shots,
                lifecycle: &mut *self.lifecycle,
                events: &mut events,
            };
            projectile.update(delta, &mut ctx);
        }

        // materialize the shots reported during the agent pass; the new
        // projectiles first fly on the next tick
        for shot in shots.take() {
            let id = self.arena.allocate();
            let projectile = Projectile::from_shot(
                id,
                shot.owner_group,
                shot.owner,
                shot.start,
                shot.target,
                &shot.weapon,
                self.now,
            );
            self.lifecycle.object_created(&projectile.entity());
            events.push(RawEvent::projectile(
                shot.owner_group,
                Event::spawned(self.now, id, Projectile::KIND, shot.start),
            ));
            self.projectiles.insert(id, projectile);
        }

        self.sweep();
        events
    }

    /// Remove dead entities and release their ids
    fn sweep(&mut self) {
        let dead: Vec<EntityId> = self
            .agents
            .values()
            .filter(|a| !a.is_alive())
            .map(|a| a.id())
            .collect();
        for id in dead {
            self.agents.shift_remove(&id);
            self.arena.release(id);
        }

        let spent: Vec<EntityId> = self
            .projectiles
            .values()
            .filter(|p| !p.is_alive())
            .map(|p| p.id())
            .collect();
        for id in spent {
            self.projectiles.shift_remove(&id);
            self.arena.release(id);
        }
    }

    /// Current simulation time in milliseconds
    pub fn now(&self) -> TimeMs {
        self.now
    }

    /// Look up an agent
    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// All live agents, in spawn order
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Ids of all live agents, in spawn order
    pub fn agent_ids(&self) -> Vec<EntityId> {
        self.agents.keys().copied().collect()
    }

    /// Look up a projectile
    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    /// All projectiles in flight, in spawn order
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.values()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("now", &self.now)
            .field("agents", &self.agents.len())
            .field("projectiles", &self.projectiles.len())
            .finish()
    }
}
