//! 说话区间检测器 - 静音窗口分类 + 区间提取

use std::path::Path;

use log::{error, info};

use crate::core::audio::silence::validate_window_size;
use crate::core::audio::speaking_intervals::validate_ease_in;
use crate::core::audio::{
    classify_windows, extract_speaking_intervals, load_wav_mono_f32, AudioError,
    VolumeThresholdDetector, WindowClassifier,
};
use crate::core::config::SilenceConfig;
use crate::core::interval::IntervalList;

/// 说话区间检测器
///
/// ```ignore
/// let detector = SpeakingDetector::create(SilenceConfig::default())?;
/// let intervals = detector.intervals_for_wav("take1.wav")?;
/// ```
pub struct SpeakingDetector {
    config: SilenceConfig,
    classifier: Box<dyn WindowClassifier>,
}

impl SpeakingDetector {
    pub fn create(config: SilenceConfig) -> Result<Self, AudioError> {
        let detector = VolumeThresholdDetector::new(config.volume_threshold, config.measure);
        Self::with_classifier(config, Box::new(detector))
    }

    pub fn with_classifier(
        config: SilenceConfig,
        classifier: Box<dyn WindowClassifier>,
    ) -> Result<Self, AudioError> {
        validate_window_size(config.window_size)?;
        validate_ease_in(config.ease_in)?;

        info!(
            "🔇 SpeakingDetector: window {:.3}s, threshold {}, ease-in {:.3}s",
            config.window_size, config.volume_threshold, config.ease_in
        );
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &SilenceConfig {
        &self.config
    }

    pub fn silence_flags(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<bool>, AudioError> {
        classify_windows(
            samples,
            sample_rate,
            self.config.window_size,
            self.classifier.as_ref(),
        )
    }

    pub fn intervals_for_samples(
        &self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<IntervalList, AudioError> {
        let duration = samples.len() as f32 / sample_rate.max(1) as f32;
        info!("🎙️ Cutting out dead air from {:.1}s of audio...", duration);

        let flags = self.silence_flags(samples, sample_rate)?;
        let intervals = extract_speaking_intervals(&flags, self.config.window_size, self.config.ease_in)?;

        info!("✅ Keeping {} speaking intervals: {:?}", intervals.len(), intervals);
        Ok(intervals)
    }

    /// 读取 WAV 文件并检测说话区间
    pub fn intervals_for_wav<P: AsRef<Path>>(&self, path: P) -> Result<IntervalList, AudioError> {
        match load_wav_mono_f32(path) {
            Ok((samples, sample_rate)) => self.intervals_for_samples(&samples, sample_rate),
            Err(e) => {
                error!("❌ Failed to load WAV: {}", e);
                Err(e)
            }
        }
    }
}
