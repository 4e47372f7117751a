//! Mock render pipeline simulation.
//!
//! The simulator assigns every queued item a random start offset and
//! duration (in ticks), then derives a completion percentage from the
//! elapsed tick count and maps it onto the stage list the render
//! options enable. No real work happens; the events it emits are
//! indistinguishable from a live pipeline as far as the UI layer is
//! concerned.
//!
//! The simulator itself is synchronous and single-owner: `tick()`
//! advances time by one step and returns the events that step
//! produced. A driver (timer task, test loop) decides the cadence.

mod curve;
mod stages;

pub use curve::{clamp, fit, fit100, percent_to_status};
pub use stages::stages_for_options;

use std::collections::HashMap;

use thiserror::Error;

use crate::config::SimulationSettings;
use crate::models::{ItemStatus, RenderOptions, RunStatus};

/// Errors raised when constructing a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    /// The item list was empty.
    #[error("no items to simulate")]
    NoItems,

    /// The stage list cannot map a percentage range.
    #[error("stage list needs at least 2 entries, got {0}")]
    TooFewStages(usize),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// One event produced by a simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// The run-level status changed.
    Status(RunStatus),
    /// One item's status or percentage changed.
    Item {
        item: String,
        status: ItemStatus,
        percent: u32,
    },
    /// Every item reached its terminal status. Emitted exactly once.
    Done,
}

/// Per-item simulation state.
///
/// Created when the simulation is constructed, mutated once per tick,
/// never persisted.
#[derive(Debug, Clone)]
pub struct ItemState {
    /// Tick offset at which this item starts making progress.
    pub start: u32,
    /// Tick span from start to completion.
    pub duration: u32,
    /// Current status.
    pub status: ItemStatus,
    /// Completion percentage, clamped to [0, 100].
    pub percent: f64,
}

/// Timer-driven mock of the render pipeline.
pub struct Simulator {
    items: Vec<String>,
    stages: Vec<ItemStatus>,
    states: HashMap<String, ItemState>,
    time: u32,
    status: RunStatus,
    done: bool,
}

impl Simulator {
    /// Create a simulation for the given items and render options.
    ///
    /// The stage list is derived from the options; start offsets and
    /// durations are drawn from the configured ranges. Passing a seed
    /// in `settings` makes the run reproducible.
    pub fn new(
        items: Vec<String>,
        options: &RenderOptions,
        settings: &SimulationSettings,
    ) -> SimResult<Self> {
        Self::with_stages(items, stages_for_options(options), settings)
    }

    /// Create a simulation with an explicit stage list.
    ///
    /// The list must hold at least two entries so percentages have a
    /// range to map onto.
    pub fn with_stages(
        items: Vec<String>,
        stages: Vec<ItemStatus>,
        settings: &SimulationSettings,
    ) -> SimResult<Self> {
        if items.is_empty() {
            return Err(SimError::NoItems);
        }
        if stages.len() < 2 {
            return Err(SimError::TooFewStages(stages.len()));
        }

        let mut rng = match settings.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let states = items
            .iter()
            .map(|item| {
                let state = ItemState {
                    start: rng.u32(settings.min_start..=settings.max_start),
                    duration: rng.u32(settings.min_duration..=settings.max_duration).max(1),
                    status: ItemStatus::Queued,
                    percent: 0.0,
                };
                (item.clone(), state)
            })
            .collect();

        Ok(Self {
            items,
            stages,
            states,
            time: 0,
            status: RunStatus::Waiting,
            done: false,
        })
    }

    /// Item labels in queue order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The enabled stage list, in progress order.
    pub fn stages(&self) -> &[ItemStatus] {
        &self.stages
    }

    /// Current state of one item.
    pub fn state(&self, item: &str) -> Option<&ItemState> {
        self.states.get(item)
    }

    /// Run-level status.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Whether every item has finished.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Elapsed ticks.
    pub fn time(&self) -> u32 {
        self.time
    }

    /// Mark the run as started.
    ///
    /// Idempotent: returns the Running transition on the first call
    /// and nothing afterwards.
    pub fn start(&mut self) -> Vec<SimEvent> {
        if self.status == RunStatus::Running || self.done {
            return Vec::new();
        }
        self.status = RunStatus::Running;
        vec![SimEvent::Status(RunStatus::Running)]
    }

    /// Advance the simulation by one tick.
    ///
    /// Emits one `Item` event per item. When the last item reaches its
    /// terminal status the tick additionally emits `Status(Success)`
    /// and `Done`, and every later tick returns no events.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        if self.done {
            return Vec::new();
        }

        self.time += 1;
        let time = f64::from(self.time);
        let mut events = Vec::with_capacity(self.items.len() + 2);
        let mut unfinished = 0usize;

        for item in &self.items {
            let Some(state) = self.states.get_mut(item.as_str()) else {
                continue;
            };
            state.percent = fit100(
                time,
                f64::from(state.start),
                f64::from(state.start + state.duration),
            );
            if let Some(status) = percent_to_status(state.percent, &self.stages) {
                state.status = status;
            }
            if state.status != ItemStatus::Done {
                unfinished += 1;
            }
            events.push(SimEvent::Item {
                item: item.clone(),
                status: state.status,
                percent: state.percent as u32,
            });
        }

        if unfinished == 0 {
            self.done = true;
            self.status = RunStatus::Success;
            events.push(SimEvent::Status(RunStatus::Success));
            events.push(SimEvent::Done);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SimulationSettings {
        SimulationSettings {
            seed: Some(7),
            ..SimulationSettings::default()
        }
    }

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Comp {:02}", i)).collect()
    }

    #[test]
    fn rejects_empty_item_list() {
        let result = Simulator::new(Vec::new(), &RenderOptions::default(), &settings());
        assert!(matches!(result, Err(SimError::NoItems)));
    }

    #[test]
    fn rejects_short_stage_list() {
        let result = Simulator::with_stages(labels(1), vec![ItemStatus::Done], &settings());
        assert!(matches!(result, Err(SimError::TooFewStages(1))));
    }

    #[test]
    fn start_is_idempotent() {
        let mut sim = Simulator::new(labels(2), &RenderOptions::default(), &settings()).unwrap();
        assert_eq!(sim.start(), vec![SimEvent::Status(RunStatus::Running)]);
        assert!(sim.start().is_empty());
        assert_eq!(sim.status(), RunStatus::Running);
    }

    #[test]
    fn fixed_ranges_follow_the_reference_curve() {
        // start=10, duration=90: tick 55 lands exactly halfway
        let fixed = SimulationSettings {
            min_start: 10,
            max_start: 10,
            min_duration: 90,
            max_duration: 90,
            seed: Some(1),
            ..SimulationSettings::default()
        };
        let mut sim =
            Simulator::new(vec!["Comp 01".into()], &RenderOptions::default(), &fixed).unwrap();
        sim.start();
        for _ in 0..55 {
            sim.tick();
        }
        let state = sim.state("Comp 01").unwrap();
        assert_eq!(state.percent, 50.0);
    }

    #[test]
    fn three_items_run_to_completion_with_one_done_event() {
        let mut sim = Simulator::new(labels(3), &RenderOptions::default(), &settings()).unwrap();
        sim.start();

        let mut done_events = 0;
        let mut success_events = 0;
        // max_start + max_duration bounds the run; leave headroom
        for _ in 0..1000 {
            for event in sim.tick() {
                match event {
                    SimEvent::Done => done_events += 1,
                    SimEvent::Status(RunStatus::Success) => success_events += 1,
                    _ => {}
                }
            }
            if sim.is_done() {
                break;
            }
        }

        assert_eq!(done_events, 1);
        assert_eq!(success_events, 1);
        assert_eq!(sim.status(), RunStatus::Success);
        for item in sim.items().to_vec() {
            let state = sim.state(&item).unwrap();
            assert_eq!(state.status, ItemStatus::Done);
            assert_eq!(state.percent, 100.0);
        }
    }

    #[test]
    fn ticks_after_completion_are_silent() {
        let mut sim = Simulator::new(labels(1), &RenderOptions::default(), &settings()).unwrap();
        sim.start();
        while !sim.is_done() {
            sim.tick();
        }
        assert!(sim.tick().is_empty());
        assert!(sim.tick().is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = Simulator::new(labels(4), &RenderOptions::default(), &settings()).unwrap();
        let b = Simulator::new(labels(4), &RenderOptions::default(), &settings()).unwrap();
        for item in a.items() {
            let sa = a.state(item).unwrap();
            let sb = b.state(item).unwrap();
            assert_eq!(sa.start, sb.start);
            assert_eq!(sa.duration, sb.duration);
        }
    }

    #[test]
    fn items_pass_through_every_enabled_stage_in_order() {
        let fixed = SimulationSettings {
            min_start: 1,
            max_start: 1,
            min_duration: 120,
            max_duration: 120,
            seed: Some(3),
            ..SimulationSettings::default()
        };
        let mut sim =
            Simulator::new(vec!["Comp 01".into()], &RenderOptions::default(), &fixed).unwrap();
        sim.start();

        let mut seen = Vec::new();
        while !sim.is_done() {
            for event in sim.tick() {
                if let SimEvent::Item { status, .. } = event {
                    if seen.last() != Some(&status) {
                        seen.push(status);
                    }
                }
            }
        }
        assert_eq!(
            seen,
            vec![
                ItemStatus::Rendering,
                ItemStatus::Encoding,
                ItemStatus::Copying,
                ItemStatus::Uploading,
                ItemStatus::Done,
            ]
        );
    }
}
