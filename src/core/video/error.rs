use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),
    #[error("Invalid frame marker symbol: {0:?}")]
    InvalidMarker(String),
    #[error("Frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
    #[error("Frame has no pixels")]
    EmptyFrame,
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}
