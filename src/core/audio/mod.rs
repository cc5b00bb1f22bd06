pub mod error;
pub mod silence;
pub mod speaking_intervals;
pub mod wav;

pub use error::AudioError;
pub use silence::{classify_windows, VolumeMeasure, VolumeThresholdDetector, WindowClassifier};
pub use speaking_intervals::extract_speaking_intervals;
pub use wav::load_wav_mono_f32;
