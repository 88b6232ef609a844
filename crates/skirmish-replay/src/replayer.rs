//! Deterministic replay of recorded sessions
//!
//! Every state transition in the simulation is deterministic given the same
//! input sequence, so re-running a [`SessionRecord`] against a fresh
//! simulation reproduces the original run exactly, raw event streams
//! included.

use crate::recorder::SessionRecord;
use crate::Result;
use skirmish_core::RawEvent;
use skirmish_sim::Simulation;

/// Replays a recorded session tick by tick
#[derive(Debug)]
pub struct Replayer {
    record: SessionRecord,
    simulation: Simulation,
    cursor: usize,
}

impl Replayer {
    /// Build a fresh simulation from the record's scenario
    pub fn new(record: SessionRecord) -> Result<Self> {
        let simulation = Simulation::from_scenario(&record.scenario)?;
        Ok(Self {
            record,
            simulation,
            cursor: 0,
        })
    }

    /// Apply the next tick's inputs and advance one tick
    ///
    /// Returns the tick's regenerated raw stream, or `None` once the record
    /// is exhausted. Inputs for entities that had already died are dropped,
    /// exactly as the live hand-off drops them.
    pub fn step(&mut self) -> Option<Vec<RawEvent>> {
        let tick = self.record.ticks.get(self.cursor)?;
        for input in &tick.inputs {
            let _ = self.simulation.apply(input.clone());
        }
        let events = self.simulation.update(tick.delta_ms);
        self.cursor += 1;
        Some(events)
    }

    /// Run the remaining ticks, concatenating the regenerated raw stream
    pub fn run_to_end(&mut self) -> Vec<RawEvent> {
        let mut all = Vec::new();
        while let Some(events) = self.step() {
            all.extend(events);
        }
        all
    }

    /// Whether every recorded tick has been replayed
    pub fn finished(&self) -> bool {
        self.cursor >= self.record.ticks.len()
    }

    /// Index of the next tick to replay
    pub fn current_tick(&self) -> usize {
        self.cursor
    }

    /// The simulation in its replayed-so-far state
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// The record being replayed
    pub fn record(&self) -> &SessionRecord {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use skirmish_core::Vec2;
    use skirmish_sim::{AgentPlacement, AgentSpec, Command, GroupDef, ScenarioDef, Simulation};

    fn scenario() -> ScenarioDef {
        ScenarioDef {
            groups: vec![
                GroupDef {
                    id: 0,
                    agents: vec![AgentPlacement {
                        spec: AgentSpec::default(),
                        position: Vec2::ZERO,
                    }],
                },
                GroupDef {
                    id: 1,
                    agents: vec![AgentPlacement {
                        spec: AgentSpec::default(),
                        position: Vec2::new(20.0, 0.0),
                    }],
                },
            ],
        }
    }

    /// Drive a live session while recording it, returning both streams
    fn record_live_session() -> (SessionRecord, Vec<RawEvent>) {
        let scenario = scenario();
        let mut simulation = Simulation::from_scenario(&scenario).unwrap();
        let mut recorder = Recorder::new(scenario);
        let ids = simulation.agent_ids();
        let mut live_stream = Vec::new();

        let move_cmd = Command::Move {
            dest: Vec2::new(2.0, 0.0),
            speed: Vec2::new(10.0, 0.0),
        };
        recorder.command(ids[0], move_cmd.clone());
        simulation.add_command(ids[0], move_cmd).unwrap();
        let attack = Command::Attack { target: ids[0] };
        recorder.command(ids[1], attack.clone());
        simulation.add_command(ids[1], attack).unwrap();

        for _ in 0..20 {
            live_stream.extend(simulation.update(50));
            recorder.end_tick(50);
        }

        (recorder.finish(), live_stream)
    }

    #[test]
    fn test_replay_reproduces_the_live_stream() {
        let (record, live_stream) = record_live_session();

        let mut replayer = Replayer::new(record).unwrap();
        let replayed = replayer.run_to_end();

        assert!(!live_stream.is_empty());
        assert_eq!(replayed, live_stream);
        assert!(replayer.finished());
    }

    #[test]
    fn test_two_replays_agree() {
        let (record, _) = record_live_session();

        let first = Replayer::new(record.clone()).unwrap().run_to_end();
        let second = Replayer::new(record).unwrap().run_to_end();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_walks_tick_by_tick() {
        let (record, _) = record_live_session();
        let ticks = record.tick_count();

        let mut replayer = Replayer::new(record).unwrap();
        let mut steps = 0;
        while replayer.step().is_some() {
            steps += 1;
        }
        assert_eq!(steps, ticks);
        assert!(replayer.step().is_none());
    }
}
