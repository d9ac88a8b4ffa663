use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::validation::Thresholds;

/// Nominal instrument rates and waveform tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorSettings {
    pub force_hz: f64,
    pub motor_hz: f64,
    pub camera_hz: f64,
    pub force_spike_probability: f64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            force_hz: 10.0,
            motor_hz: 5.0,
            camera_hz: 1.0,
            force_spike_probability: 0.0015,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BufferSettings {
    /// Retained readings per sensor type.
    pub history_capacity: usize,
    /// Retained warning/error verdicts.
    pub alert_capacity: usize,
    /// Frames buffered per subscriber before it is disconnected.
    pub hub_queue_depth: usize,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            history_capacity: 200,
            alert_capacity: 100,
            hub_queue_depth: 64,
        }
    }
}

/// Process-lifetime configuration. Loaded once at startup; read-only after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sensors: SensorSettings,
    pub thresholds: Thresholds,
    pub buffers: BufferSettings,
}

impl Settings {
    /// Reads settings from a JSON file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed settings file {}", path.display()))
    }
}
