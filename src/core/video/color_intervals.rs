//! 颜色标记 → 保留区间
//!
//! Reduces a full per-frame marker sequence to the intervals to keep. The
//! pass looks only at adjacent pairs `(prev, curr)`, where position `i` is
//! the index of `prev`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::VideoError;
use super::marker::FrameMarker;
use crate::core::interval::{Interval, IntervalList};

/// How cue frames are turned into kept spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPolicy {
    /// The pair rules exactly: `content→keep`, `keep→content`, `drop→content`.
    /// A `drop→keep` pair is not a decision point, so content before a red
    /// card followed directly by a green card is kept along with both cards.
    #[default]
    Literal,
    /// Back-to-back cue frames form one block decided by its last frame.
    /// A keep block retains the content since the previous block, a drop
    /// block discards it, and trailing content is retained.
    Resolved,
}

/// Pair patterns the literal rule set reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ContentToKeep,
    KeepToContent,
    DropToContent,
}

impl Transition {
    pub fn between(prev: FrameMarker, curr: FrameMarker) -> Option<Self> {
        match (prev, curr) {
            (FrameMarker::Content, FrameMarker::Keep) => Some(Transition::ContentToKeep),
            (FrameMarker::Keep, FrameMarker::Content) => Some(Transition::KeepToContent),
            (FrameMarker::Drop, FrameMarker::Content) => Some(Transition::DropToContent),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct KeepAccumulator {
    start_of_last_keep_run: usize,
    keep_start: f64,
    intervals: IntervalList,
}

impl KeepAccumulator {
    fn step(mut self, i: usize, transition: Transition, fps: f64) -> Self {
        match transition {
            Transition::ContentToKeep => self.start_of_last_keep_run = i,
            Transition::KeepToContent => {
                let keep_end = self.start_of_last_keep_run as f64 / fps;
                self.intervals.push(Interval::new(self.keep_start, keep_end));
                self.keep_start = (i + 1) as f64 / fps;
            }
            Transition::DropToContent => self.keep_start = i as f64 / fps,
        }
        self
    }

    fn finish(mut self, markers: &[FrameMarker], fps: f64) -> IntervalList {
        // No pairs for fewer than two frames: the tail still closes at frame 0.
        if markers.last() != Some(&FrameMarker::Drop) {
            let last_index = markers.len().saturating_sub(1);
            self.intervals
                .push(Interval::new(self.keep_start, last_index as f64 / fps));
        }
        self.intervals
    }
}

#[derive(Debug, Default)]
struct CueBlockAccumulator {
    pending_start: usize,
    block_start: usize,
    intervals: IntervalList,
}

impl CueBlockAccumulator {
    fn step(mut self, i: usize, prev: FrameMarker, curr: FrameMarker, fps: f64) -> Self {
        match (prev.is_cue(), curr.is_cue()) {
            (false, true) => self.block_start = i + 1,
            (true, false) => self.close_block(prev, i + 1, fps),
            _ => {}
        }
        self
    }

    fn close_block(&mut self, decision: FrameMarker, block_end: usize, fps: f64) {
        if decision == FrameMarker::Keep && self.block_start > self.pending_start {
            self.intervals.push(Interval::new(
                self.pending_start as f64 / fps,
                self.block_start as f64 / fps,
            ));
        }
        self.pending_start = block_end;
    }

    fn finish(mut self, markers: &[FrameMarker], fps: f64) -> IntervalList {
        let n = markers.len();
        match markers.last() {
            Some(&last) if last.is_cue() => self.close_block(last, n, fps),
            Some(_) if n > self.pending_start => self.intervals.push(Interval::new(
                self.pending_start as f64 / fps,
                n as f64 / fps,
            )),
            _ => {}
        }
        self.intervals
    }
}

pub fn validate_fps(fps: f64) -> Result<f64, VideoError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(VideoError::InvalidFrameRate(fps))
    }
}

/// Keep intervals under [`MarkerPolicy::Literal`].
pub fn extract_color_intervals(markers: &[FrameMarker], fps: f64) -> Result<IntervalList, VideoError> {
    extract_color_intervals_with(markers, fps, MarkerPolicy::Literal)
}

pub fn extract_color_intervals_with(
    markers: &[FrameMarker],
    fps: f64,
    policy: MarkerPolicy,
) -> Result<IntervalList, VideoError> {
    let fps = validate_fps(fps)?;
    let pairs = markers.windows(2).enumerate();

    let intervals = match policy {
        MarkerPolicy::Literal => pairs
            .fold(KeepAccumulator::default(), |acc, (i, pair)| {
                match Transition::between(pair[0], pair[1]) {
                    Some(transition) => acc.step(i, transition, fps),
                    None => acc,
                }
            })
            .finish(markers, fps),
        MarkerPolicy::Resolved => pairs
            .fold(CueBlockAccumulator::default(), |acc, (i, pair)| {
                acc.step(i, pair[0], pair[1], fps)
            })
            .finish(markers, fps),
    };

    debug!(
        "🎨 {:?}: {} markers @ {} fps -> {} keep intervals",
        policy,
        markers.len(),
        fps,
        intervals.len()
    );
    Ok(intervals)
}
