//! AEQueue mock harness - main entry point
//!
//! Walks the same session the widget harness walks by hand: load the
//! mock queue, drop a couple of dynamic links onto it, then simulate a
//! render and stream the progress into the queue model until every
//! item is done.

mod app;
mod driver;
mod messages;
mod queue;

use std::path::PathBuf;

use tokio::sync::mpsc;

use aeq_core::config::ConfigManager;
use aeq_core::links::{MimeData, DYNAMIC_LINK_MIME};
use aeq_core::logging::init_tracing;
use aeq_core::sim::SimEvent;

use app::App;
use messages::AppMsg;

/// Default config path: .config/settings.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}

/// Payload equivalent to dragging two comps out of the compositing tool.
const SAMPLE_DROP: &str = r#"<?xml version="1.0"?>
<SourceList>
    <Source>
        <ID>Dropped 01</ID>
        <Name>Dropped 01</Name>
        <Project>/projects/demo.aep</Project>
    </Source>
    <Source>
        <ID>Dropped 02</ID>
        <Name>Dropped 02</Name>
        <Project>/projects/demo.aep</Project>
    </Source>
</SourceList>
"#;

#[tokio::main]
async fn main() {
    // Load configuration first (needed for the log level)
    let config_path = default_config_path();
    let mut config = ConfigManager::new(&config_path);
    if let Err(e) = config.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    init_tracing(config.settings().logging.level);
    tracing::info!("AEQueue mock harness starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", aeq_core::version());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(config.settings().clone(), tx.clone());

    // Scripted session
    let mime = MimeData::with_format(DYNAMIC_LINK_MIME, SAMPLE_DROP);
    let _ = tx.send(AppMsg::LoadQueue);
    let _ = tx.send(AppMsg::DragEntered(mime.clone()));
    let _ = tx.send(AppMsg::Dropped(mime));
    let _ = tx.send(AppMsg::Render);
    drop(tx);

    while let Some(msg) = rx.recv().await {
        let finished = matches!(&msg, AppMsg::Sim(SimEvent::Done));
        app.update(msg);
        if finished {
            break;
        }
    }

    tracing::info!("Run finished with status: {}", app.run_status());
    for row in app.queue().rows() {
        tracing::info!("  {} - {} {}%", row.label, row.status, row.percent);
    }
}
