use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV format error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),
}
