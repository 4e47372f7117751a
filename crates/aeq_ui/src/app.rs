//! Harness application state and update loop.
//!
//! Holds the headless equivalents of the widget state the real
//! application mutates (queue rows, control enabled/visible flags,
//! section header text) and applies messages to them. Simulation
//! events arrive over the same channel as user actions, so every
//! mutation happens on the loop that owns the state.

use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;

use aeq_core::config::Settings;
use aeq_core::links::{self, MimeData};
use aeq_core::models::{ItemStatus, RunStatus};
use aeq_core::sim::{SimEvent, Simulator};

use crate::driver::SimDriver;
use crate::messages::AppMsg;
use crate::queue::QueueModel;

/// Widget-level state driven by the run status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsModel {
    /// Text of the section header above the options panel.
    pub header_text: String,
    /// Whether the options panel accepts edits.
    pub options_enabled: bool,
    /// Whether the render button accepts clicks.
    pub render_enabled: bool,
    /// Whether the load-queue button is shown.
    pub queue_button_visible: bool,
}

impl Default for ControlsModel {
    fn default() -> Self {
        // the Waiting arrangement
        Self {
            header_text: "OPTIONS".to_string(),
            options_enabled: true,
            render_enabled: true,
            queue_button_visible: true,
        }
    }
}

/// The harness application.
pub struct App {
    settings: Settings,
    items: Vec<String>,
    queue: QueueModel,
    controls: ControlsModel,
    run_status: RunStatus,
    driver: SimDriver,
    /// Last progress bucket logged per item (progress_step units).
    progress_marks: HashMap<String, u32>,
    started_at: Option<chrono::DateTime<chrono::Local>>,
}

impl App {
    /// Create the application with the given settings.
    ///
    /// `tx` is the channel simulation events come back on.
    pub fn new(settings: Settings, tx: UnboundedSender<AppMsg>) -> Self {
        let items = (1..=settings.simulation.item_count)
            .map(|i| format!("Comp {:02}", i))
            .collect();
        let driver = SimDriver::new(settings.simulation.interval_ms, tx);
        Self {
            settings,
            items,
            queue: QueueModel::new(),
            controls: ControlsModel::default(),
            run_status: RunStatus::Waiting,
            driver,
            progress_marks: HashMap::new(),
            started_at: None,
        }
    }

    /// The render queue state.
    pub fn queue(&self) -> &QueueModel {
        &self.queue
    }

    /// The control-widget state.
    pub fn controls(&self) -> &ControlsModel {
        &self.controls
    }

    /// The run-level status.
    pub fn run_status(&self) -> RunStatus {
        self.run_status
    }

    /// Whether a simulated render is in flight.
    pub fn is_rendering(&self) -> bool {
        self.driver.is_running()
    }

    /// Apply one message to the application state.
    pub fn update(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::LoadQueue => self.load_queue(),
            AppMsg::Render => self.render(),
            AppMsg::DragEntered(mime) => self.drag_entered(&mime),
            AppMsg::Dropped(mime) => self.dropped(&mime),
            AppMsg::Sim(event) => self.apply_sim_event(event),
        }
    }

    fn load_queue(&mut self) {
        self.queue.clear();
        for item in &self.items {
            self.queue.add_item(item.clone(), ItemStatus::Queued, 0);
        }
        tracing::info!("Loaded {} items into the queue", self.queue.len());
        self.set_run_status(RunStatus::Waiting);
    }

    fn render(&mut self) {
        if self.driver.is_running() {
            tracing::debug!("render already in progress, ignoring");
            return;
        }

        let sim = match Simulator::new(
            self.items.clone(),
            &self.settings.options,
            &self.settings.simulation,
        ) {
            Ok(sim) => sim,
            Err(e) => {
                tracing::error!("Cannot start render: {}", e);
                return;
            }
        };

        let stages: Vec<String> = sim.stages().iter().map(ToString::to_string).collect();
        tracing::info!(
            "Simulating render of {} items through: {}",
            self.items.len(),
            stages.join(" -> ")
        );

        self.progress_marks.clear();
        self.started_at = Some(chrono::Local::now());
        self.driver.start(sim);
    }

    fn apply_sim_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::Status(status) => self.set_run_status(status),
            SimEvent::Item {
                item,
                status,
                percent,
            } => self.item_changed(item, status, percent),
            SimEvent::Done => self.run_finished(),
        }
    }

    fn item_changed(&mut self, item: String, status: ItemStatus, percent: u32) {
        let previous = self.queue.get(&item).map(|row| row.status);
        if !self.queue.update_item(&item, status, percent) {
            tracing::warn!("Progress for unknown item '{}'", item);
            return;
        }

        if previous != Some(status) {
            tracing::info!("{}: {}", item, status);
        }

        // progress lines only at configured step boundaries
        let step = self.settings.logging.progress_step.max(1);
        let mark = percent / step;
        if self.progress_marks.get(&item) != Some(&mark) {
            tracing::debug!("{}: {} {}%", item, status, percent);
            self.progress_marks.insert(item, mark);
        }
    }

    fn run_finished(&mut self) {
        match self.started_at.take() {
            Some(started) => {
                let elapsed = chrono::Local::now().signed_duration_since(started);
                tracing::info!(
                    "Render simulation finished in {} ms",
                    elapsed.num_milliseconds()
                );
            }
            None => tracing::info!("Render simulation finished"),
        }
    }

    fn set_run_status(&mut self, status: RunStatus) {
        self.run_status = status;
        tracing::info!("Render status: {}", status);
        self.controls = match status {
            RunStatus::Waiting => ControlsModel::default(),
            RunStatus::Running => ControlsModel {
                header_text: "STATUS".to_string(),
                options_enabled: false,
                render_enabled: false,
                queue_button_visible: false,
            },
            RunStatus::Success | RunStatus::Failed => ControlsModel {
                header_text: "STATUS".to_string(),
                options_enabled: false,
                render_enabled: false,
                queue_button_visible: true,
            },
        };
    }

    fn drag_entered(&self, mime: &MimeData) {
        let formats: Vec<&str> = mime.formats().collect();
        tracing::debug!("Drag over queue with formats: {}", formats.join(", "));
        for format in &formats {
            if let Some(text) = mime.text_lossy(format) {
                tracing::trace!("{}: {}", format, text);
            }
        }
        tracing::debug!(
            "Payload carries dynamic links: {}",
            links::has_dynamic_links(mime)
        );
    }

    fn dropped(&mut self, mime: &MimeData) {
        let dropped = match links::dynamic_links(mime) {
            Ok(dropped) => dropped,
            Err(e) => {
                tracing::error!("Failed to decode dropped links: {}", e);
                return;
            }
        };

        for link in dropped {
            match link.id() {
                Some(id) => {
                    self.queue.add_item(id, ItemStatus::Queued, 0);
                    let fields: HashMap<&str, &str> = link.fields().collect();
                    tracing::info!(
                        "Queued dropped item '{}': {}",
                        id,
                        serde_json::to_string(&fields).unwrap_or_default()
                    );
                }
                None => tracing::warn!("Dropped link without an ID field, skipping"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeq_core::config::SimulationSettings;
    use aeq_core::links::DYNAMIC_LINK_MIME;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn test_app() -> (App, UnboundedReceiver<AppMsg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let settings = Settings {
            simulation: SimulationSettings {
                interval_ms: 1,
                item_count: 3,
                min_start: 1,
                max_start: 2,
                min_duration: 5,
                max_duration: 10,
                seed: Some(11),
                ..SimulationSettings::default()
            },
            ..Settings::default()
        };
        (App::new(settings, tx), rx)
    }

    #[test]
    fn load_queue_fills_rows_and_resets_controls() {
        let (mut app, _rx) = test_app();
        app.update(AppMsg::LoadQueue);

        assert_eq!(app.queue().len(), 3);
        for row in app.queue().rows() {
            assert_eq!(row.status, ItemStatus::Queued);
            assert_eq!(row.percent, 0);
        }
        assert_eq!(app.queue().rows()[0].label, "Comp 01");
        assert_eq!(app.run_status(), RunStatus::Waiting);
        assert_eq!(app.controls(), &ControlsModel::default());
    }

    #[test]
    fn run_status_drives_the_controls() {
        let (mut app, _rx) = test_app();

        app.update(AppMsg::Sim(SimEvent::Status(RunStatus::Running)));
        assert_eq!(app.controls().header_text, "STATUS");
        assert!(!app.controls().options_enabled);
        assert!(!app.controls().render_enabled);
        assert!(!app.controls().queue_button_visible);

        app.update(AppMsg::Sim(SimEvent::Status(RunStatus::Success)));
        assert_eq!(app.controls().header_text, "STATUS");
        assert!(!app.controls().options_enabled);
        assert!(app.controls().queue_button_visible);

        app.update(AppMsg::Sim(SimEvent::Status(RunStatus::Waiting)));
        assert_eq!(app.controls(), &ControlsModel::default());
    }

    #[test]
    fn dropped_links_become_queue_rows() {
        let (mut app, _rx) = test_app();
        let xml = r#"<SourceList>
            <Source><ID>Drop 01</ID><Name>One</Name></Source>
            <Source><Name>No id here</Name></Source>
            <Source><ID>Drop 02</ID></Source>
        </SourceList>"#;
        let mime = MimeData::with_format(DYNAMIC_LINK_MIME, xml);

        app.update(AppMsg::DragEntered(mime.clone()));
        app.update(AppMsg::Dropped(mime));

        assert_eq!(app.queue().len(), 2);
        assert!(app.queue().get("Drop 01").is_some());
        assert!(app.queue().get("Drop 02").is_some());
    }

    #[test]
    fn malformed_drop_leaves_the_queue_alone() {
        let (mut app, _rx) = test_app();
        app.update(AppMsg::LoadQueue);
        let mime = MimeData::with_format(DYNAMIC_LINK_MIME, "<Source><ID>broken");

        app.update(AppMsg::Dropped(mime));

        assert_eq!(app.queue().len(), 3);
        for row in app.queue().rows() {
            assert_eq!(row.status, ItemStatus::Queued);
        }
    }

    #[tokio::test]
    async fn render_runs_the_queue_to_done() {
        let (mut app, mut rx) = test_app();
        app.update(AppMsg::LoadQueue);
        app.update(AppMsg::Render);
        assert!(app.is_rendering());

        // a second render while one is live is a no-op
        app.update(AppMsg::Render);

        let mut running_events = 0;
        let mut done_events = 0;
        while let Some(msg) = rx.recv().await {
            if matches!(&msg, AppMsg::Sim(SimEvent::Status(RunStatus::Running))) {
                running_events += 1;
            }
            let finished = matches!(&msg, AppMsg::Sim(SimEvent::Done));
            app.update(msg);
            if finished {
                done_events += 1;
                break;
            }
        }

        assert_eq!(running_events, 1);
        assert_eq!(done_events, 1);
        assert_eq!(app.run_status(), RunStatus::Success);
        for row in app.queue().rows() {
            assert_eq!(row.status, ItemStatus::Done);
            assert_eq!(row.percent, 100);
        }
        assert!(!app.controls().options_enabled);
        assert!(app.controls().queue_button_visible);
    }
}
