//! Skirmish Sync - per-observer event stream compaction
//!
//! The simulation produces a raw, chronological event stream every tick.
//! This crate turns that stream into the minimal ordered event batch each
//! remote observer needs:
//!
//! - **Compactor**: merges consecutive same-velocity movement events per
//!   entity while preserving causal order with reserved indices
//! - **GroupSync**: the per-observer pipeline (classify, compact, deliver)
//! - **OutputSink**: the trait the networking layer implements to receive
//!   batches
//!
//! The wire encoding of a batch is out of scope; sinks receive plain event
//! lists.

mod batch;
mod compactor;
mod error;
mod sink;

pub use batch::{Category, EventBatch};
pub use compactor::Compactor;
pub use error::{Error, Result};
pub use sink::{GroupSync, OutputSink};
