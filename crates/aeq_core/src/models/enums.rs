//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Status of one queued item as it moves through the pipeline.
///
/// The order matters: progress percentages map linearly onto the
/// enabled subset of these stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Queued,
    Rendering,
    Encoding,
    Copying,
    Uploading,
    Done,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Queued => write!(f, "queued"),
            ItemStatus::Rendering => write!(f, "rendering"),
            ItemStatus::Encoding => write!(f, "encoding"),
            ItemStatus::Copying => write!(f, "copying"),
            ItemStatus::Uploading => write!(f, "uploading"),
            ItemStatus::Done => write!(f, "done"),
        }
    }
}

/// Status of a whole simulated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Queue loaded, nothing running yet.
    #[default]
    Waiting,
    /// Simulation timer is active.
    Running,
    /// Every item reached its terminal status.
    Success,
    /// Run aborted with an error.
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Waiting => write!(f, "waiting"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Success => write!(f, "success"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

impl RunStatus {
    /// Whether this is a terminal status.
    pub fn is_finished(&self) -> bool {
        matches!(self, RunStatus::Success | RunStatus::Failed)
    }
}
