//! Simulation driver - owns the tick timer.
//!
//! Runs the simulation on a tokio interval and forwards every event
//! to the application over the message channel. The application stays
//! single-threaded as far as state goes; this task only ticks and
//! sends.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use aeq_core::sim::{SimEvent, Simulator};

use crate::messages::AppMsg;

/// Ticks a simulation and forwards its events to the app channel.
pub struct SimDriver {
    interval: Duration,
    tx: UnboundedSender<AppMsg>,
    handle: Option<JoinHandle<()>>,
}

impl SimDriver {
    /// Create a driver ticking at the given interval.
    pub fn new(interval_ms: u64, tx: UnboundedSender<AppMsg>) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
            tx,
            handle: None,
        }
    }

    /// Whether a simulation is currently being ticked.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start ticking the given simulation.
    ///
    /// No-op while a previous run is still live. The timer task stops
    /// itself after forwarding the simulation's `Done` event, or as
    /// soon as the receiving side goes away.
    pub fn start(&mut self, mut sim: Simulator) {
        if self.is_running() {
            tracing::debug!("simulation already running, ignoring start");
            return;
        }

        let tx = self.tx.clone();
        let interval = self.interval;
        self.handle = Some(tokio::spawn(async move {
            for event in sim.start() {
                if tx.send(AppMsg::Sim(event)).is_err() {
                    return;
                }
            }

            let mut ticker = tokio::time::interval(interval);
            // the first interval tick completes immediately; consume it
            // so every simulation tick waits a full interval
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let events = sim.tick();
                let finished = events.iter().any(|e| matches!(e, SimEvent::Done));
                for event in events {
                    if tx.send(AppMsg::Sim(event)).is_err() {
                        return;
                    }
                }
                if finished {
                    break;
                }
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeq_core::config::SimulationSettings;
    use aeq_core::models::{RenderOptions, RunStatus};
    use tokio::sync::mpsc;

    fn fast_settings() -> SimulationSettings {
        SimulationSettings {
            interval_ms: 1,
            min_start: 1,
            max_start: 1,
            min_duration: 5,
            max_duration: 5,
            seed: Some(1),
            ..SimulationSettings::default()
        }
    }

    fn fast_sim() -> Simulator {
        Simulator::new(
            vec!["Comp 01".into(), "Comp 02".into()],
            &RenderOptions::default(),
            &fast_settings(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn runs_to_completion_and_stops() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut driver = SimDriver::new(1, tx);
        driver.start(fast_sim());

        let mut running = 0;
        let mut done = 0;
        while let Some(msg) = rx.recv().await {
            match msg {
                AppMsg::Sim(SimEvent::Status(RunStatus::Running)) => running += 1,
                AppMsg::Sim(SimEvent::Done) => {
                    done += 1;
                    break;
                }
                _ => {}
            }
        }
        assert_eq!(running, 1);
        assert_eq!(done, 1);
    }

    #[tokio::test]
    async fn start_while_running_is_a_no_op() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // long interval keeps the first run alive during the test
        let mut driver = SimDriver::new(60_000, tx);
        driver.start(fast_sim());
        assert!(driver.is_running());

        driver.start(fast_sim());

        // only the first run's Running transition arrives
        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first,
            AppMsg::Sim(SimEvent::Status(RunStatus::Running))
        ));
        assert!(rx.try_recv().is_err());
    }
}
