//! 颜色剪辑器 - 帧分类 + 保留区间提取

use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use crate::core::config::ColorEditConfig;
use crate::core::interval::IntervalList;
use crate::core::video::{
    extract_color_intervals_with, ColorSampleClassifier, Frame, FrameClassifier, FrameMarker,
    VideoError,
};

/// 颜色剪辑器
///
/// Frames are classified in parallel on a dedicated pool; the reduction to
/// intervals is a single sequential pass.
pub struct ColorEditor {
    config: ColorEditConfig,
    classifier: Box<dyn FrameClassifier>,
    pool: rayon::ThreadPool,
}

impl ColorEditor {
    /// 使用默认的颜色采样分类器
    pub fn create(config: ColorEditConfig) -> Result<Self, VideoError> {
        let classifier = ColorSampleClassifier::with_config(
            config.sample_count,
            config.seed,
            config.thresholds.clone(),
        );
        Self::with_classifier(config, Box::new(classifier))
    }

    pub fn with_classifier(
        config: ColorEditConfig,
        classifier: Box<dyn FrameClassifier>,
    ) -> Result<Self, VideoError> {
        let num_threads = if config.num_threads == 0 {
            num_cpus::get()
        } else {
            config.num_threads
        };
        debug!("Using {} threads for frame classification", num_threads);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| VideoError::ThreadPool(e.to_string()))?;

        info!("🎬 ColorEditor: created ({:?} policy)", config.policy);
        Ok(Self {
            config,
            classifier,
            pool,
        })
    }

    pub fn config(&self) -> &ColorEditConfig {
        &self.config
    }

    /// 批量分类帧（并行）
    pub fn classify_frames(&self, frames: &[Frame]) -> Result<Vec<FrameMarker>, VideoError> {
        let classifier = self.classifier.as_ref();
        self.pool
            .install(|| frames.par_iter().map(|f| classifier.classify(f)).collect())
    }

    pub fn intervals_for_markers(
        &self,
        markers: &[FrameMarker],
        fps: f64,
    ) -> Result<IntervalList, VideoError> {
        let intervals = extract_color_intervals_with(markers, fps, self.config.policy)?;
        info!("✂️ Keeping color edit intervals: {:?}", intervals);
        Ok(intervals)
    }

    pub fn intervals_for_frames(&self, frames: &[Frame], fps: f64) -> Result<IntervalList, VideoError> {
        info!("🔍 Looking for color coded cue cards in {} frames...", frames.len());
        let markers = self.classify_frames(frames)?;
        self.intervals_for_markers(&markers, fps)
    }

    /// Classify a dumped frame sequence; `paths[i]` is frame `i`.
    pub fn intervals_for_image_files<P>(&self, paths: &[P], fps: f64) -> Result<IntervalList, VideoError>
    where
        P: AsRef<Path> + Sync,
    {
        info!("📂 Classifying {} frame images", paths.len());
        let classifier = self.classifier.as_ref();
        let markers = self.pool.install(|| {
            paths
                .par_iter()
                .enumerate()
                .map(|(i, path)| {
                    let frame = Frame::open(path, i as u64, fps)?;
                    classifier.classify(&frame)
                })
                .collect::<Result<Vec<_>, VideoError>>()
        })?;
        self.intervals_for_markers(&markers, fps)
    }
}

impl Drop for ColorEditor {
    fn drop(&mut self) {
        info!("🗑️ ColorEditor: released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interval::Interval;
    use crate::core::video::{MarkerPolicy, MockFrameClassifier};

    const WHITE: [u8; 3] = [255, 255, 255];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const RED: [u8; 3] = [255, 0, 0];

    fn solid_frames(sequence: &[([u8; 3], usize)]) -> Vec<Frame> {
        sequence
            .iter()
            .flat_map(|&(rgb, count)| std::iter::repeat(rgb).take(count))
            .enumerate()
            .map(|(i, rgb)| Frame::solid(16, 9, rgb, i as u64))
            .collect()
    }

    fn test_config(policy: MarkerPolicy) -> ColorEditConfig {
        ColorEditConfig {
            seed: Some(1),
            policy,
            num_threads: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_frames_keeps_order() {
        let editor = ColorEditor::create(test_config(MarkerPolicy::Literal)).unwrap();
        let frames = solid_frames(&[(WHITE, 3), (GREEN, 2), (RED, 1), (BLUE, 2)]);

        let markers = editor.classify_frames(&frames).unwrap();
        assert_eq!(
            FrameMarker::parse_sequence("cccyyncc").unwrap(),
            markers
        );
    }

    #[test]
    fn test_intervals_for_frames_resolved() {
        let editor = ColorEditor::create(test_config(MarkerPolicy::Resolved)).unwrap();
        let frames = solid_frames(&[(WHITE, 10), (GREEN, 10), (BLUE, 10), (RED, 10), (WHITE, 10)]);

        let intervals = editor.intervals_for_frames(&frames, 10.0).unwrap();
        assert_eq!(intervals, vec![Interval::new(0.0, 1.0), Interval::new(4.0, 5.0)]);
    }

    #[test]
    fn test_mock_classifier_injected() {
        let editor = ColorEditor::with_classifier(
            test_config(MarkerPolicy::Literal),
            Box::new(MockFrameClassifier::with_pattern(|n| {
                if (5..8).contains(&n) {
                    FrameMarker::Keep
                } else {
                    FrameMarker::Content
                }
            })),
        )
        .unwrap();
        let frames = solid_frames(&[(WHITE, 12)]);

        let intervals = editor.intervals_for_frames(&frames, 1.0).unwrap();
        assert_eq!(intervals, vec![Interval::new(0.0, 4.0), Interval::new(8.0, 11.0)]);
    }

    #[test]
    fn test_intervals_for_image_files() {
        let dir = tempfile::tempdir().unwrap();
        let colors = [WHITE, WHITE, GREEN, BLUE, BLUE];
        let paths: Vec<_> = colors
            .iter()
            .enumerate()
            .map(|(i, &[r, g, b])| {
                let path = dir.path().join(format!("frame_{:04}.png", i));
                image::RgbaImage::from_pixel(8, 8, image::Rgba([r, g, b, 255]))
                    .save(&path)
                    .unwrap();
                path
            })
            .collect();

        let editor = ColorEditor::create(test_config(MarkerPolicy::Resolved)).unwrap();
        let intervals = editor.intervals_for_image_files(&paths, 1.0).unwrap();
        assert_eq!(intervals, vec![Interval::new(0.0, 2.0), Interval::new(3.0, 5.0)]);
    }

    #[test]
    fn test_missing_image_is_error() {
        let editor = ColorEditor::create(test_config(MarkerPolicy::Literal)).unwrap();
        let result = editor.intervals_for_image_files(&["/nonexistent/frame.png"], 30.0);
        assert!(matches!(result, Err(VideoError::Image(_))));
    }
}
