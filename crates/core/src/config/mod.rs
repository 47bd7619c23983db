use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{command::AnimationKind, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pacing: PacingConfig,
    pub queue: QueueConfig,
    /// Command run in one-shot mode when none is given on the command line.
    pub default_animation: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            queue: QueueConfig::default(),
            default_animation: "cycle".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Per-tick sleep intervals of the animation loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub tick_ms: u64,
    pub shimmer_tick_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            shimmer_tick_ms: 20,
        }
    }
}

impl PacingConfig {
    pub fn interval(&self, kind: AnimationKind) -> Duration {
        match kind {
            AnimationKind::Shimmer => Duration::from_millis(self.shimmer_tick_ms),
            _ => Duration::from_millis(self.tick_ms),
        }
    }
}

/// Remote command queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub endpoint: Option<String>,
    /// Pause after a non-200 response before polling again.
    pub retry_delay_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            retry_delay_ms: 250,
        }
    }
}

impl QueueConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
