//! Per-observer synchronization pipeline
//!
//! One [`GroupSync`] per connected observer: it classifies each raw event
//! from that observer's point of view, feeds the compactor, and delivers
//! the compacted batch to the observer's output sink once per tick.

use crate::batch::{Category, EventBatch};
use crate::compactor::Compactor;
use crate::error::Result;
use skirmish_core::{GroupId, RawEvent};

/// Receives one observer group's compacted batch each tick
///
/// Implementations own the wire encoding and transport; the batch is an
/// opaque, group-scoped payload from the core's point of view.
pub trait OutputSink: Send {
    fn deliver(&mut self, batch: EventBatch) -> Result<()>;
}

/// The compaction pipeline for one observer group
#[derive(Debug)]
pub struct GroupSync {
    observer: GroupId,
    compactor: Compactor,
}

impl GroupSync {
    /// Create the pipeline for one observer
    pub fn new(observer: GroupId) -> Self {
        Self {
            observer,
            compactor: Compactor::new(),
        }
    }

    /// The observer this pipeline feeds
    pub fn observer(&self) -> GroupId {
        self.observer
    }

    /// Category of a raw event from this observer's point of view
    pub fn classify(&self, raw: &RawEvent) -> Category {
        if raw.from_projectile {
            Category::Projectile
        } else if raw.origin == self.observer {
            Category::Agent
        } else {
            Category::Enemy
        }
    }

    /// Feed one tick's raw stream, in order
    pub fn ingest(&mut self, raw: &[RawEvent]) {
        for event in raw {
            self.compactor.add_event(self.classify(event), event.event.clone());
        }
    }

    /// Compact the tick and deliver it; nothing is sent on an empty tick
    pub fn flush(&mut self, sink: &mut dyn OutputSink) -> Result<()> {
        match self.compactor.build() {
            Some(batch) => sink.deliver(batch),
            None => Ok(()),
        }
    }
}
