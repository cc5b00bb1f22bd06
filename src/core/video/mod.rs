pub mod classifier;
pub mod color_intervals;
pub mod error;
pub mod frame;
pub mod marker;

pub use classifier::{ColorSampleClassifier, ColorThresholds, FrameClassifier, MockFrameClassifier};
pub use color_intervals::{extract_color_intervals, extract_color_intervals_with, MarkerPolicy};
pub use error::VideoError;
pub use frame::Frame;
pub use marker::FrameMarker;
