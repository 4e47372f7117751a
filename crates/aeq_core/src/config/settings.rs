//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML
//! tables. Each section can be updated independently for atomic
//! section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::RenderOptions;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Simulation timing and item setup.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Default render options.
    #[serde(default)]
    pub options: RenderOptions,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Sections of the config file, for section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Simulation,
    Options,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Simulation => "simulation",
            ConfigSection::Options => "options",
            ConfigSection::Logging => "logging",
        }
    }
}

/// Simulation timing and item setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Timer interval between ticks, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Number of mock items loaded into the queue.
    #[serde(default = "default_item_count")]
    pub item_count: u32,

    /// Smallest random start offset, in ticks.
    #[serde(default = "default_min_start")]
    pub min_start: u32,

    /// Largest random start offset, in ticks.
    #[serde(default = "default_max_start")]
    pub max_start: u32,

    /// Smallest random duration, in ticks.
    #[serde(default = "default_min_duration")]
    pub min_duration: u32,

    /// Largest random duration, in ticks.
    #[serde(default = "default_max_duration")]
    pub max_duration: u32,

    /// Fixed RNG seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_interval_ms() -> u64 {
    50
}

fn default_item_count() -> u32 {
    5
}

fn default_min_start() -> u32 {
    1
}

fn default_max_start() -> u32 {
    20
}

fn default_min_duration() -> u32 {
    100
}

fn default_max_duration() -> u32 {
    200
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            item_count: default_item_count(),
            min_start: default_min_start(),
            max_start: default_max_start(),
            min_duration: default_min_duration(),
            max_duration: default_max_duration(),
            seed: None,
        }
    }
}

impl SimulationSettings {
    /// Clamp out-of-range values into something runnable.
    ///
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.interval_ms == 0 {
            self.interval_ms = default_interval_ms();
            changed = true;
        }
        if self.item_count == 0 {
            self.item_count = default_item_count();
            changed = true;
        }
        if self.max_start < self.min_start {
            self.max_start = self.min_start;
            changed = true;
        }
        if self.min_duration == 0 {
            self.min_duration = 1;
            changed = true;
        }
        if self.max_duration < self.min_duration {
            self.max_duration = self.min_duration;
            changed = true;
        }
        changed
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Per-item progress is logged only at these percent intervals.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            progress_step: default_progress_step(),
        }
    }
}

impl LoggingSettings {
    /// Clamp out-of-range values. Returns true if anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if self.progress_step == 0 || self.progress_step > 100 {
            self.progress_step = default_progress_step();
            changed = true;
        }
        changed
    }
}
