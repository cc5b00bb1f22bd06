use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::AudioError;

/// Loudness measure compared against the volume threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeMeasure {
    #[default]
    Peak,
    Rms,
}

pub trait WindowClassifier: Send + Sync {
    fn is_silent(&self, window: &[f32]) -> bool;
}

impl<F> WindowClassifier for F
where
    F: Fn(&[f32]) -> bool + Send + Sync,
{
    fn is_silent(&self, window: &[f32]) -> bool {
        self(window)
    }
}

pub fn peak_volume(window: &[f32]) -> f32 {
    window.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
}

pub fn rms_volume(window: &[f32]) -> f32 {
    if window.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = window.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / window.len() as f64).sqrt() as f32
}

/// 静音检测器 - 窗口音量低于阈值即视为静音
#[derive(Debug, Clone)]
pub struct VolumeThresholdDetector {
    threshold: f32,
    measure: VolumeMeasure,
}

impl VolumeThresholdDetector {
    pub fn new(threshold: f32, measure: VolumeMeasure) -> Self {
        Self { threshold, measure }
    }

    pub fn volume(&self, window: &[f32]) -> f32 {
        match self.measure {
            VolumeMeasure::Peak => peak_volume(window),
            VolumeMeasure::Rms => rms_volume(window),
        }
    }
}

impl Default for VolumeThresholdDetector {
    fn default() -> Self {
        Self::new(0.005, VolumeMeasure::Peak)
    }
}

impl WindowClassifier for VolumeThresholdDetector {
    fn is_silent(&self, window: &[f32]) -> bool {
        self.volume(window) < self.threshold
    }
}

pub fn validate_window_size(window_size: f64) -> Result<f64, AudioError> {
    if window_size.is_finite() && window_size > 0.0 {
        Ok(window_size)
    } else {
        Err(AudioError::InvalidParameter(format!(
            "window_size must be positive, got {}",
            window_size
        )))
    }
}

/// Number of whole windows that fit in the audio; a partial tail window is ignored.
pub fn window_count(sample_count: usize, sample_rate: u32, window_size: f64) -> usize {
    if sample_rate == 0 {
        return 0;
    }
    let duration = sample_count as f64 / sample_rate as f64;
    (duration / window_size).floor() as usize
}

/// One silence flag per window, classified in parallel.
pub fn classify_windows(
    samples: &[f32],
    sample_rate: u32,
    window_size: f64,
    classifier: &dyn WindowClassifier,
) -> Result<Vec<bool>, AudioError> {
    let window_size = validate_window_size(window_size)?;
    if sample_rate == 0 {
        return Err(AudioError::InvalidParameter("sample_rate must be non-zero".into()));
    }

    let num_windows = window_count(samples.len(), sample_rate, window_size);
    let samples_per_window = window_size * sample_rate as f64;
    debug!(
        "🔍 Classifying {} windows of {:.3}s ({:.1} samples each)",
        num_windows, window_size, samples_per_window
    );

    let flags = (0..num_windows)
        .into_par_iter()
        .map(|i| {
            let start = ((i as f64 * samples_per_window).round() as usize).min(samples.len());
            let end = (((i + 1) as f64 * samples_per_window).round() as usize).min(samples.len());
            classifier.is_silent(&samples[start..end])
        })
        .collect();

    Ok(flags)
}
