//! 剪辑规划 - 先按颜色标记剪，再在剪后的音频上去除静音
//!
//! Speaking intervals are detected on the color-cut audio, so they live on
//! the edited timeline. [`compose`] maps them back to source time so both
//! passes can be expressed as one EDL against the original clip.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::audio::SpeakingDetector;
use crate::api::edl::{edl_paths, export_edl};
use crate::api::video::ColorEditor;
use crate::core::audio::AudioError;
use crate::core::config::EditConfig;
use crate::core::edl::{Edl, EdlError};
use crate::core::interval::{Interval, IntervalList};
use crate::core::timeline::{compose, slice_by_intervals};
use crate::core::video::{Frame, FrameMarker, VideoError};

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Video error: {0}")]
    Video(#[from] VideoError),
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
    #[error("EDL error: {0}")]
    Edl(#[from] EdlError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPlan {
    /// Source time.
    pub color_intervals: IntervalList,
    /// Time on the color-cut timeline.
    pub speaking_intervals: IntervalList,
    /// Source time; both passes applied.
    pub final_intervals: IntervalList,
}

pub struct EditPlanner {
    color: ColorEditor,
    speaking: SpeakingDetector,
    skip_color_edit: bool,
}

impl EditPlanner {
    pub fn create(config: EditConfig) -> Result<Self, EditError> {
        crate::init_logging();
        let color = ColorEditor::create(config.color)?;
        let speaking = SpeakingDetector::create(config.silence)?;
        Ok(Self::from_parts(color, speaking, config.skip_color_edit))
    }

    pub fn from_parts(color: ColorEditor, speaking: SpeakingDetector, skip_color_edit: bool) -> Self {
        Self {
            color,
            speaking,
            skip_color_edit,
        }
    }

    pub fn plan(
        &self,
        markers: &[FrameMarker],
        fps: f64,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<EditPlan, EditError> {
        let color_intervals = if self.skip_color_edit {
            info!("⏭️ Skipping color editing...");
            let duration = samples.len() as f64 / sample_rate.max(1) as f64;
            vec![Interval::new(0.0, duration)]
        } else {
            self.color.intervals_for_markers(markers, fps)?
        };

        let edited_audio = slice_by_intervals(samples, &color_intervals, sample_rate as f64);
        let speaking_intervals = self.speaking.intervals_for_samples(&edited_audio, sample_rate)?;
        let final_intervals = compose(&color_intervals, &speaking_intervals);

        info!(
            "🎯 Edit plan: {} color intervals, {} speaking intervals -> {} final",
            color_intervals.len(),
            speaking_intervals.len(),
            final_intervals.len()
        );
        Ok(EditPlan {
            color_intervals,
            speaking_intervals,
            final_intervals,
        })
    }

    pub fn plan_frames(
        &self,
        frames: &[Frame],
        fps: f64,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<EditPlan, EditError> {
        let markers = if self.skip_color_edit {
            Vec::new()
        } else {
            self.color.classify_frames(frames)?
        };
        self.plan(&markers, fps, samples, sample_rate)
    }

    /// Write `<clip>.color.edl` and `<clip>.speaking.edl` next to `input`.
    /// The speaking EDL carries the combined cut in source time.
    pub fn export(&self, plan: &EditPlan, input: &Path, fps: f64) -> Result<(Edl, Edl), EditError> {
        let clip_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (color_path, speaking_path) = edl_paths(input);

        let color = export_edl(&plan.color_intervals, &clip_name, color_path, fps)?;
        let speaking = export_edl(&plan.final_intervals, &clip_name, speaking_path, fps)?;
        Ok((color, speaking))
    }
}
