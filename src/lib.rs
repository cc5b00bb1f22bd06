pub mod api;
pub mod core;

pub use crate::core::audio::extract_speaking_intervals;
pub use crate::core::interval::{Interval, IntervalList};
pub use crate::core::video::{extract_color_intervals, extract_color_intervals_with, FrameMarker, MarkerPolicy};

pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("markcut_rust"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        // try_init: a host application may already own the logger
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("debug"),
        )
        .try_init();
    }
}
