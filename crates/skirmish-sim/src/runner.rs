//! Dedicated tick thread for a simulation
//!
//! Each simulation runs its own unsynchronized, single-writer update loop.
//! Inputs cross in through a thread-safe hand-off channel and each tick's
//! raw event stream crosses out through another; the simulation itself only
//! ever executes on the owning tick thread. Disposing the runner stops the
//! loop and joins the thread; the in-flight tick is discarded, not drained.

use crate::error::{Error, Result};
use crate::simulation::{SimInput, Simulation};
use skirmish_core::RawEvent;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a simulation's tick thread
pub struct SimulationRunner {
    input: Sender<SimInput>,
    stop: Sender<()>,
    handle: Option<JoinHandle<Simulation>>,
}

impl SimulationRunner {
    /// Spawn the tick loop
    ///
    /// `tick_ms` is both the wall-clock pacing and the simulated delta of
    /// every tick (fixed step). Each tick's raw stream is sent to `output`;
    /// the loop ends on its own when the output receiver is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `tick_ms` is zero.
    pub fn spawn(simulation: Simulation, tick_ms: u64, output: Sender<Vec<RawEvent>>) -> Self {
        assert!(tick_ms > 0, "tick interval must be non-zero");
        let (input_tx, input_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::spawn(move || tick_loop(simulation, tick_ms, input_rx, stop_rx, output));
        Self {
            input: input_tx,
            stop: stop_tx,
            handle: Some(handle),
        }
    }

    /// Hand an input to the tick thread
    pub fn send(&self, input: SimInput) -> Result<()> {
        self.input.send(input).map_err(|_| Error::Disposed)
    }

    /// A cloneable sender for the input side of the hand-off
    pub fn input(&self) -> Sender<SimInput> {
        self.input.clone()
    }

    /// Stop the tick loop and join the thread, returning the simulation in
    /// its final state
    ///
    /// # Panics
    ///
    /// Panics if the tick thread itself panicked.
    pub fn dispose(mut self) -> Simulation {
        let _ = self.stop.send(());
        self.handle
            .take()
            .expect("runner already disposed")
            .join()
            .expect("tick thread panicked")
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for SimulationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationRunner")
            .field("running", &self.handle.is_some())
            .finish()
    }
}

fn tick_loop(
    mut simulation: Simulation,
    tick_ms: u64,
    input: Receiver<SimInput>,
    stop: Receiver<()>,
    output: Sender<Vec<RawEvent>>,
) -> Simulation {
    loop {
        match stop.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break,
            Err(TryRecvError::Empty) => {}
        }

        // drain the hand-off; inputs for entities that died mid-flight are
        // dropped, a normal race at this boundary
        loop {
            match input.try_recv() {
                Ok(sim_input) => {
                    let _ = simulation.apply(sim_input);
                }
                Err(_) => break,
            }
        }

        let events = simulation.update(tick_ms);
        if output.send(events).is_err() {
            // nobody is listening anymore
            break;
        }

        thread::sleep(Duration::from_millis(tick_ms));
    }
    simulation
}
