//! Error types for skirmish-sync

use thiserror::Error;

/// Sync error type
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink refused a batch
    #[error("Output sink rejected batch: {0}")]
    Sink(String),
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, Error>;
