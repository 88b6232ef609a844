//! Skirmish Replay - recording and deterministic replay
//!
//! Every simulation transition is deterministic given the same input
//! sequence, so a session is fully described by its scenario and per-tick
//! hand-off inputs. This crate provides:
//!
//! - **Recorder**: capture a live session's inputs tick by tick
//! - **Replayer**: re-run a record against a fresh simulation and get back
//!   the identical raw event stream
//! - **Exporter**: serialize records to RON (and JSON behind the
//!   `serde_json` feature)

mod error;
mod exporter;
mod recorder;
mod replayer;

pub use error::{Error, Result};
pub use exporter::{from_ron, ExportFormat, Exporter};
pub use recorder::{Recorder, SessionRecord, TickRecord};
pub use replayer::Replayer;
