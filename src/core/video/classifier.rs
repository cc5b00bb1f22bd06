use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::VideoError;
use super::frame::Frame;
use super::marker::FrameMarker;

pub trait FrameClassifier: Send + Sync {
    fn classify(&self, frame: &Frame) -> Result<FrameMarker, VideoError>;
}

/// Mean-color bounds for the green (keep) and red (drop) cue cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    pub red_min_r: f64,
    pub red_max_g: f64,
    pub red_max_b: f64,
    pub green_max_r: f64,
    pub green_min_g: f64,
    pub green_max_b: f64,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            red_min_r: 120.0,
            red_max_g: 50.0,
            red_max_b: 50.0,
            green_max_r: 80.0,
            green_min_g: 120.0,
            green_max_b: 50.0,
        }
    }
}

impl ColorThresholds {
    pub fn marker_for(&self, [r, g, b]: [f64; 3]) -> FrameMarker {
        let is_red = r > self.red_min_r && g < self.red_max_g && b < self.red_max_b;
        let is_green = r < self.green_max_r && g > self.green_min_g && b < self.green_max_b;

        if is_red {
            FrameMarker::Drop
        } else if is_green {
            FrameMarker::Keep
        } else {
            FrameMarker::Content
        }
    }
}

/// Average RGB of `n` random pixels. `n == 0` averages every pixel.
pub fn sample_average_color<R: Rng + ?Sized>(frame: &Frame, n: usize, rng: &mut R) -> [f64; 3] {
    if frame.pixel_count() == 0 {
        return [0.0; 3];
    }
    let mut sum = [0u64; 3];

    let count = if n == 0 {
        for px in frame.data.chunks_exact(4) {
            sum[0] += px[0] as u64;
            sum[1] += px[1] as u64;
            sum[2] += px[2] as u64;
        }
        frame.pixel_count()
    } else {
        for _ in 0..n {
            let x = rng.random_range(0..frame.width);
            let y = rng.random_range(0..frame.height);
            let [r, g, b] = frame.rgb_at(x, y);
            sum[0] += r as u64;
            sum[1] += g as u64;
            sum[2] += b as u64;
        }
        n
    };

    let count = count as f64;
    [
        sum[0] as f64 / count,
        sum[1] as f64 / count,
        sum[2] as f64 / count,
    ]
}

/// 颜色采样分类器 - 随机取样像素求平均色，与阈值比较
pub struct ColorSampleClassifier {
    sample_count: usize,
    seed: Option<u64>,
    thresholds: ColorThresholds,
}

impl ColorSampleClassifier {
    pub fn new() -> Self {
        Self {
            sample_count: 10,
            seed: None,
            thresholds: ColorThresholds::default(),
        }
    }

    pub fn with_config(sample_count: usize, seed: Option<u64>, thresholds: ColorThresholds) -> Self {
        Self {
            sample_count,
            seed,
            thresholds,
        }
    }

    pub fn average_color(&self, frame: &Frame) -> [f64; 3] {
        match self.seed {
            // Seed per frame so parallel classification stays reproducible.
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ frame.frame_number);
                sample_average_color(frame, self.sample_count, &mut rng)
            }
            None => sample_average_color(frame, self.sample_count, &mut rand::rng()),
        }
    }
}

impl Default for ColorSampleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClassifier for ColorSampleClassifier {
    fn classify(&self, frame: &Frame) -> Result<FrameMarker, VideoError> {
        frame.validate()?;
        Ok(self.thresholds.marker_for(self.average_color(frame)))
    }
}

pub struct MockFrameClassifier {
    // 按帧号返回预设标记
    pattern: Box<dyn Fn(u64) -> FrameMarker + Send + Sync>,
}

impl MockFrameClassifier {
    pub fn with_pattern<F>(pattern: F) -> Self
    where
        F: Fn(u64) -> FrameMarker + Send + Sync + 'static,
    {
        Self {
            pattern: Box::new(pattern),
        }
    }

    /// Frame `n` gets `markers[n]`; frames past the end are content.
    pub fn with_markers(markers: Vec<FrameMarker>) -> Self {
        Self::with_pattern(move |n| {
            markers
                .get(n as usize)
                .copied()
                .unwrap_or(FrameMarker::Content)
        })
    }
}

impl FrameClassifier for MockFrameClassifier {
    fn classify(&self, frame: &Frame) -> Result<FrameMarker, VideoError> {
        Ok((self.pattern)(frame.frame_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const WHITE: [u8; 3] = [255, 255, 255];

    #[test]
    fn test_solid_colors_classified() {
        let classifier = ColorSampleClassifier::new();

        let cases = [
            (RED, FrameMarker::Drop),
            (GREEN, FrameMarker::Keep),
            (BLUE, FrameMarker::Content),
            (WHITE, FrameMarker::Content),
        ];
        for (rgb, expected) in cases {
            let frame = Frame::solid(32, 18, rgb, 0);
            assert_eq!(classifier.classify(&frame).unwrap(), expected);
        }
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        let t = ColorThresholds::default();
        assert_eq!(t.marker_for([120.0, 0.0, 0.0]), FrameMarker::Content);
        assert_eq!(t.marker_for([121.0, 49.0, 49.0]), FrameMarker::Drop);
        assert_eq!(t.marker_for([79.0, 121.0, 49.0]), FrameMarker::Keep);
        assert_eq!(t.marker_for([80.0, 200.0, 0.0]), FrameMarker::Content);
    }

    #[test]
    fn test_exhaustive_average() {
        // left half black, right half white
        let mut data = Vec::new();
        for _y in 0..2 {
            data.extend_from_slice(&[0, 0, 0, 255, 255, 255, 255, 255]);
        }
        let frame = Frame::new(2, 2, data, 0, 0);
        let avg = sample_average_color(&frame, 0, &mut StdRng::seed_from_u64(1));
        assert_eq!(avg, [127.5, 127.5, 127.5]);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let mut data = Vec::new();
        for i in 0..64u32 {
            let v = (i * 4) as u8;
            data.extend_from_slice(&[v, 255 - v, v / 2, 255]);
        }
        let frame = Frame::new(8, 8, data, 0, 5);
        let classifier = ColorSampleClassifier::with_config(10, Some(42), ColorThresholds::default());

        assert_eq!(classifier.average_color(&frame), classifier.average_color(&frame));
    }

    #[test]
    fn test_malformed_frame_rejected() {
        let classifier = ColorSampleClassifier::new();
        let frame = Frame::new(10, 10, vec![0u8; 12], 0, 0);
        assert!(classifier.classify(&frame).is_err());
    }

    #[test]
    fn test_mock_classifier_with_markers() {
        let classifier = MockFrameClassifier::with_markers(vec![FrameMarker::Keep, FrameMarker::Drop]);
        let frame = |n| Frame::solid(2, 2, WHITE, n);

        assert_eq!(classifier.classify(&frame(0)).unwrap(), FrameMarker::Keep);
        assert_eq!(classifier.classify(&frame(1)).unwrap(), FrameMarker::Drop);
        assert_eq!(classifier.classify(&frame(9)).unwrap(), FrameMarker::Content);
    }
}
