//! Skirmish Sim - state machines and the authoritative tick loop
//!
//! This crate implements the server-side simulation core:
//!
//! - **Movement progress**: distance/time travel budgets
//! - **Movement**: the Idle/Moving position state machine
//! - **Weapons**: the Reloaded/Reloading state machine
//! - **Commands**: per-agent bounded queues and the execution state machine
//! - **Dispatch**: per-entity time-ordered notification delivery
//! - **Projectiles**: straight-line flight with a distance budget
//! - **Simulation**: the per-group container and its tick
//! - **Runner**: one dedicated tick thread per simulation
//!
//! Everything the core needs from the wider object graph crosses a mediator
//! trait (`LifecycleObserver`, `ProjectileSpawner`, `TargetLookup`); the
//! core never imports a concrete implementation.

mod agent;
mod command;
pub mod config;
mod dispatch;
mod error;
mod mediator;
mod movement;
mod progress;
mod projectile;
mod runner;
mod simulation;
mod weapon;

pub use agent::Agent;
pub use command::{Command, CommandQueue, CommandState};
pub use config::{AgentPlacement, AgentSpec, GroupDef, ScenarioDef, WeaponSpec};
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use mediator::{
    LifecycleObserver, NullObserver, ProjectileSpawner, TargetLookup, TickContext,
};
pub use movement::Mover;
pub use progress::MovementProgress;
pub use projectile::Projectile;
pub use runner::SimulationRunner;
pub use simulation::{SimInput, Simulation};
