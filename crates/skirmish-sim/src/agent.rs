//! Per-agent command execution state machine
//!
//! Each agent owns one bounded command queue and one currently-executing
//! command. The idle command never completes and never blocks: whenever the
//! current command finishes, the next queued command (or idle again) takes
//! its place on the following tick.

use crate::command::{Command, CommandQueue, CommandState};
use crate::config::AgentSpec;
use crate::dispatch::Dispatcher;
use crate::mediator::TickContext;
use crate::movement::Mover;
use crate::weapon::Weapon;
use serde::{Deserialize, Serialize};
use skirmish_core::{DefId, Entity, EntityId, Event, EventKind, GroupId, ObjectState, RawEvent, TimeMs, Vec2};

/// A simulated combat agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    id: EntityId,
    group: GroupId,
    kind: DefId,
    size: f64,
    health: f64,
    mover: Mover,
    weapon: Weapon,
    queue: CommandQueue,
    current: Command,
    current_state: CommandState,
    dispatcher: Dispatcher,
    last_delta: TimeMs,
    alive: bool,
}

impl Agent {
    /// Create an agent from its spec at a position
    ///
    /// # Panics
    ///
    /// Panics if the spec fails validation; an invalid agent definition is
    /// a construction bug.
    pub fn new(id: EntityId, group: GroupId, spec: &AgentSpec, position: Vec2, now: TimeMs) -> Self {
        spec.validate().expect("invalid agent spec");
        Self {
            id,
            group,
            kind: spec.kind.clone(),
            size: spec.size,
            health: spec.health,
            mover: Mover::new(position),
            weapon: Weapon::new(spec.weapon.clone()),
            queue: CommandQueue::new(spec.queue_capacity),
            current: Command::Idle,
            current_state: CommandState::Executing,
            dispatcher: Dispatcher::starting_at(now),
            last_delta: 0,
            alive: true,
        }
    }

    /// Deliver an out-of-band notification; consumed once its timestamp is
    /// due on the agent's local clock
    pub fn notify(&mut self, event: Event) {
        self.dispatcher.schedule(event);
    }

    /// Add a command
    ///
    /// - `ClearQueue` empties the queue and discards the in-flight
    ///   command's progress; the next tick re-takes from the (now empty)
    ///   queue.
    /// - `ResumeLast` restarts the current command in place if it was
    ///   stopped.
    /// - Anything else is appended; returns `false` without enqueuing when
    ///   the queue is full.
    pub fn add_command(&mut self, command: Command) -> bool {
        match command {
            Command::ClearQueue => {
                self.queue.clear();
                self.mover.stop();
                self.current = Command::Idle;
                self.current_state = CommandState::Done;
                true
            }
            Command::ResumeLast => {
                if self.current_state == CommandState::Stopped {
                    self.current_state = CommandState::Executing;
                }
                true
            }
            other => self.queue.push(other),
        }
    }

    /// One simulation tick
    pub fn update(&mut self, delta: TimeMs, ctx: &mut TickContext<'_>) {
        if !self.alive {
            return;
        }
        self.last_delta = delta;

        // 1. consume due notifications
        for event in self.dispatcher.advance(delta) {
            self.handle_event(event, ctx);
            if !self.alive {
                return;
            }
        }

        // 2. reload
        self.weapon.update(delta);

        // 3. take the next command once the current one is finished
        if self.current.is_idle() || self.current_state == CommandState::Done {
            self.current = self.queue.pop().unwrap_or(Command::Idle);
            self.current_state = CommandState::Pending;
        }

        // 4. execute
        if !self.current.is_idle() && self.current_state != CommandState::Stopped {
            self.execute_current(delta, ctx);
        }
    }

    /// Preempt the current command (e.g. a collision resolved by the engine)
    ///
    /// Reverses the state change already applied during the in-progress
    /// tick, then marks the command stopped; `ResumeLast` restarts it in
    /// place.
    pub fn command_interrupted(&mut self) {
        if self.current.is_idle() {
            return;
        }
        if let (Command::Move { .. }, CommandState::Executing) = (&self.current, self.current_state)
        {
            self.mover.rewind(self.last_delta);
        }
        self.current_state = CommandState::Stopped;
    }

    /// Whether the current command has finished
    pub fn is_command_done(&self) -> bool {
        self.current_state == CommandState::Done
    }

    fn handle_event(&mut self, event: Event, ctx: &mut TickContext<'_>) {
        match event.kind {
            EventKind::Hit { damage, .. } => {
                self.health -= damage;
                let now = self.dispatcher.now();
                ctx.events.push(RawEvent::agent(
                    self.group,
                    Event::hit(now, self.id, damage, self.mover.position()),
                ));
                if self.health <= 0.0 {
                    self.destroy(ctx);
                }
            }
            EventKind::Destroyed { .. } => self.destroy(ctx),
            _ => {}
        }
    }

    fn destroy(&mut self, ctx: &mut TickContext<'_>) {
        self.alive = false;
        self.mover.stop();
        let now = self.dispatcher.now();
        ctx.events.push(RawEvent::agent(
            self.group,
            Event::destroyed(now, self.id, self.mover.position()),
        ));
        ctx.lifecycle.object_destroyed(&self.entity());
    }

    fn execute_current(&mut self, delta: TimeMs, ctx: &mut TickContext<'_>) {
        match self.current.clone() {
            Command::Move { dest, speed } => {
                if self.current_state == CommandState::Pending {
                    self.mover.start_movement(dest, speed);
                    self.current_state = CommandState::Executing;
                }
                self.mover.update(delta);
                let now = self.dispatcher.now();
                if self.mover.is_moving() {
                    ctx.events.push(RawEvent::agent(
                        self.group,
                        Event::moved(now, self.id, dest, self.mover.velocity()),
                    ));
                } else {
                    // arrived: report the stop so observers quit interpolating
                    self.current_state = CommandState::Done;
                    ctx.events.push(RawEvent::agent(
                        self.group,
                        Event::moved(now, self.id, dest, Vec2::ZERO),
                    ));
                }
            }
            Command::Attack { target } => {
                self.current_state = CommandState::Executing;
                match ctx.targets.position_of(target) {
                    None => {
                        // target is gone; nothing left to attack
                        self.current_state = CommandState::Done;
                    }
                    Some(target_pos) => {
                        let start = self.mover.position();
                        if self
                            .weapon
                            .shoot(self.group, self.id, start, target_pos, ctx.projectiles)
                        {
                            let now = self.dispatcher.now();
                            ctx.events.push(RawEvent::agent(
                                self.group,
                                Event::shot(now, self.id, start, target_pos),
                            ));
                            self.current_state = CommandState::Done;
                        }
                    }
                }
            }
            Command::Idle => {}
            Command::ClearQueue | Command::ResumeLast => {
                unreachable!("control commands are never executed")
            }
        }
    }

    /// Snapshot of the agent as an entity record
    pub fn entity(&self) -> Entity {
        let mut state = ObjectState::new(self.kind.clone(), self.mover.position(), self.size);
        state.velocity = self.mover.velocity();
        Entity::new(self.id, self.group, state)
    }

    /// The agent's id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The agent's owning group
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Current position
    pub fn position(&self) -> Vec2 {
        self.mover.position()
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.mover.velocity()
    }

    /// Remaining hit points
    pub fn health(&self) -> f64 {
        self.health
    }

    /// Whether the agent is still part of the simulation
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// The currently-executing command
    pub fn current_command(&self) -> &Command {
        &self.current
    }

    /// The current command's lifecycle state
    pub fn current_state(&self) -> CommandState {
        self.current_state
    }

    /// Number of queued commands
    pub fn queued_commands(&self) -> usize {
        self.queue.len()
    }

    /// The agent's weapon
    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeaponSpec;
    use crate::mediator::{LifecycleObserver, ProjectileSpawner, TargetLookup};

    #[derive(Default)]
    struct TestHarness {
        shots: Vec<(EntityId, Vec2, Vec2)>,
        destroyed: Vec<EntityId>,
        targets: Vec<(EntityId, Vec2)>,
        events: Vec<RawEvent>,
    }

    struct Shots(Vec<(EntityId, Vec2, Vec2)>);

    impl ProjectileSpawner for Shots {
        fn create_projectile(
            &mut self,
            _owner_group: GroupId,
            owner: EntityId,
            start: Vec2,
            target: Vec2,
            _weapon: &WeaponSpec,
        ) {
            self.0.push((owner, start, target));
        }
    }

    struct Destroyed(Vec<EntityId>);

    impl LifecycleObserver for Destroyed {
        fn object_created(&mut self, _entity: &Entity) {}

        fn object_destroyed(&mut self, entity: &Entity) {
            self.0.push(entity.id);
        }
    }

    struct Targets(Vec<(EntityId, Vec2)>);

    impl TargetLookup for Targets {
        fn position_of(&self, id: EntityId) -> Option<Vec2> {
            self.0.iter().find(|(t, _)| *t == id).map(|(_, p)| *p)
        }
    }

    impl TestHarness {
        fn tick(&mut self, agent: &mut Agent, delta: TimeMs) {
            let targets = Targets(self.targets.clone());
            let mut shots = Shots(Vec::new());
            let mut destroyed = Destroyed(Vec::new());
            let mut ctx = TickContext {
                targets: &targets,
                projectiles: &mut shots,
                lifecycle: &mut destroyed,
                events: &mut self.events,
            };
            agent.update(delta, &mut ctx);
            self.shots.extend(shots.0);
            self.destroyed.extend(destroyed.0);
        }
    }

    fn agent_at_origin() -> Agent {
        Agent::new(
            EntityId::new(1),
            GroupId::new(0),
            &AgentSpec::default(),
            Vec2::ZERO,
            0,
        )
    }

    fn move_to(x: f64) -> Command {
        Command::Move {
            dest: Vec2::new(x, 0.0),
            speed: Vec2::new(10.0, 0.0),
        }
    }

    #[test]
    fn test_executes_queued_commands_in_order() {
        let mut agent = agent_at_origin();
        let mut harness = TestHarness::default();

        assert!(agent.add_command(move_to(1.0)));
        assert!(agent.add_command(move_to(2.0)));

        // first tick takes the first command; 1 unit at 10 u/s is 100 ms
        harness.tick(&mut agent, 50);
        assert!(matches!(agent.current_command(), Command::Move { .. }));
        harness.tick(&mut agent, 100);
        assert!(agent.is_command_done());
        assert_eq!(agent.position(), Vec2::new(1.0, 0.0));

        // next tick picks up the second move
        harness.tick(&mut agent, 50);
        assert_eq!(agent.queued_commands(), 0);
        assert!(!agent.is_command_done());
    }

    #[test]
    fn test_clear_queue_discards_progress() {
        let mut agent = agent_at_origin();
        let mut harness = TestHarness::default();

        agent.add_command(move_to(10.0));
        agent.add_command(move_to(20.0));
        agent.add_command(move_to(30.0));
        harness.tick(&mut agent, 100);
        assert!(agent.velocity() != Vec2::ZERO);

        agent.add_command(Command::ClearQueue);
        assert_eq!(agent.queued_commands(), 0);
        assert_eq!(agent.velocity(), Vec2::ZERO);

        // a follow-up command is the only thing queued
        assert!(agent.add_command(move_to(5.0)));
        assert_eq!(agent.queued_commands(), 1);
    }

    #[test]
    fn test_interrupt_rolls_back_and_resume_continues() {
        let mut agent = agent_at_origin();
        let mut harness = TestHarness::default();

        agent.add_command(move_to(10.0));
        harness.tick(&mut agent, 100);
        assert_eq!(agent.position(), Vec2::new(1.0, 0.0));

        // the engine preempts the move: the tick's progress is reversed
        agent.command_interrupted();
        assert_eq!(agent.position(), Vec2::ZERO);
        assert_eq!(agent.current_state(), CommandState::Stopped);

        // stopped commands do not execute
        harness.tick(&mut agent, 100);
        assert_eq!(agent.position(), Vec2::ZERO);

        // resume restarts in place
        agent.add_command(Command::ResumeLast);
        harness.tick(&mut agent, 100);
        assert_eq!(agent.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_attack_fires_once_and_completes() {
        let mut agent = agent_at_origin();
        let mut harness = TestHarness::default();
        let target = EntityId::new(9);
        harness.targets.push((target, Vec2::new(10.0, 0.0)));

        agent.add_command(Command::Attack { target });
        harness.tick(&mut agent, 16);

        assert_eq!(harness.shots.len(), 1);
        assert!(agent.is_command_done());

        // weapon is now reloading; a second attack waits for the reload
        agent.add_command(Command::Attack { target });
        harness.tick(&mut agent, 16);
        assert_eq!(harness.shots.len(), 1);
        assert!(!agent.is_command_done());
    }

    #[test]
    fn test_attack_on_missing_target_completes() {
        let mut agent = agent_at_origin();
        let mut harness = TestHarness::default();

        agent.add_command(Command::Attack {
            target: EntityId::new(404),
        });
        harness.tick(&mut agent, 16);
        assert!(agent.is_command_done());
        assert!(harness.shots.is_empty());
    }

    #[test]
    fn test_hit_notifications_reduce_health_and_destroy() {
        let mut agent = agent_at_origin();
        let mut harness = TestHarness::default();

        agent.notify(Event::hit(10, agent.id(), 60.0, Vec2::ZERO));
        harness.tick(&mut agent, 16);
        assert_eq!(agent.health(), 40.0);
        assert!(agent.is_alive());

        agent.notify(Event::hit(30, agent.id(), 60.0, Vec2::ZERO));
        harness.tick(&mut agent, 16);
        assert!(!agent.is_alive());
        assert_eq!(harness.destroyed, vec![agent.id()]);

        // the stream carries the hit and the destruction
        let kinds: Vec<bool> = harness
            .events
            .iter()
            .map(|e| matches!(e.event.kind, EventKind::Destroyed { .. }))
            .collect();
        assert!(kinds.contains(&true));
    }

    #[test]
    fn test_queue_overflow_is_reported() {
        let mut agent = Agent::new(
            EntityId::new(1),
            GroupId::new(0),
            &AgentSpec {
                queue_capacity: 2,
                ..AgentSpec::default()
            },
            Vec2::ZERO,
            0,
        );

        assert!(agent.add_command(move_to(1.0)));
        assert!(agent.add_command(move_to(2.0)));
        assert!(!agent.add_command(move_to(3.0)));
        assert_eq!(agent.queued_commands(), 2);
    }
}
