//! Error types for skirmish-sim

use skirmish_core::EntityId;
use thiserror::Error;

/// Simulation error type
#[derive(Debug, Error)]
pub enum Error {
    /// The entity is not (or no longer) part of the simulation
    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    /// A scenario definition failed validation
    #[error("Invalid definition: {0}")]
    InvalidDef(String),

    /// The tick thread has been disposed
    #[error("Simulation disposed")]
    Disposed,
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, Error>;
