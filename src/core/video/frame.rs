use std::path::Path;
use std::time::Duration;

use image::RgbaImage;

use super::error::VideoError;

/// 帧数据结构
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA 格式
    pub timestamp: Duration,
    pub frame_number: u64,
}

impl Frame {
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        timestamp_ms: u64,
        frame_number: u64,
    ) -> Self {
        Self {
            width,
            height,
            data,
            timestamp: Duration::from_millis(timestamp_ms),
            frame_number,
        }
    }

    /// A frame filled with one opaque color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3], frame_number: u64) -> Self {
        let data = rgb
            .iter()
            .copied()
            .chain(std::iter::once(255))
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::new(width, height, data, 0, frame_number)
    }

    pub fn from_image(img: RgbaImage, frame_number: u64, fps: f64) -> Self {
        let (width, height) = img.dimensions();
        let timestamp_ms = if fps > 0.0 {
            (frame_number as f64 * 1000.0 / fps) as u64
        } else {
            0
        };
        Self::new(width, height, img.into_raw(), timestamp_ms, frame_number)
    }

    /// Decode a still (PNG/JPEG/BMP) dumped from a video, e.g. `frame_000042.png`.
    pub fn open<P: AsRef<Path>>(path: P, frame_number: u64, fps: f64) -> Result<Self, VideoError> {
        let img = image::open(path)?.to_rgba8();
        Ok(Self::from_image(img, frame_number, fps))
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<(), VideoError> {
        if self.pixel_count() == 0 {
            return Err(VideoError::EmptyFrame);
        }
        let expected = self.pixel_count() * 4;
        if self.data.len() != expected {
            return Err(VideoError::BufferSize {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// RGB at `(x, y)`. Callers must stay inside the frame.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}
