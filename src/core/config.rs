use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::audio::VolumeMeasure;
use crate::core::video::{ColorThresholds, MarkerPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorEditConfig {
    /// Random pixels averaged per frame; 0 averages the whole frame.
    pub sample_count: usize,
    /// Fixed sampling seed for reproducible runs.
    pub seed: Option<u64>,
    pub thresholds: ColorThresholds,
    pub policy: MarkerPolicy,
    /// Classification threads; 0 uses every core.
    pub num_threads: usize,
}

impl Default for ColorEditConfig {
    fn default() -> Self {
        Self {
            sample_count: 10,
            seed: None,
            thresholds: ColorThresholds::default(),
            policy: MarkerPolicy::Literal,
            num_threads: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilenceConfig {
    pub window_size: f64,
    pub volume_threshold: f32,
    pub ease_in: f64,
    pub measure: VolumeMeasure,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            window_size: 0.1,
            volume_threshold: 0.005,
            ease_in: 0.1,
            measure: VolumeMeasure::Peak,
        }
    }
}

impl SilenceConfig {
    /// Background hum keeps peaks up; judge windows by RMS instead.
    pub fn for_noisy_room() -> Self {
        Self {
            window_size: 0.2,
            volume_threshold: 0.02,
            ease_in: 0.15,
            measure: VolumeMeasure::Rms,
        }
    }

    pub fn for_tight_cut() -> Self {
        Self {
            window_size: 0.05,
            volume_threshold: 0.005,
            ease_in: 0.05,
            measure: VolumeMeasure::Peak,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    pub color: ColorEditConfig,
    pub silence: SilenceConfig,
    pub skip_color_edit: bool,
}

impl EditConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
