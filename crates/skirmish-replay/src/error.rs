//! Error types for skirmish-replay

use thiserror::Error;

/// Replay error type
#[derive(Debug, Error)]
pub enum Error {
    /// The recorded scenario failed to build a simulation
    #[error("Replay error: {0}")]
    Replay(#[from] skirmish_sim::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Export error
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type for replay operations
pub type Result<T> = std::result::Result<T, Error>;
