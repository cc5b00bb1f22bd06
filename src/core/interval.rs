//! 时间区间 - 两条提取流水线共享的区间类型与合并规则

use serde::{Deserialize, Serialize};

/// A `[start, end]` span of source-media time in seconds.
///
/// Serializes as a two-element array so interval lists read the same way
/// they are logged: `[[0.0, 1.0], [2.5, 4.0]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

pub type IntervalList = Vec<Interval>;

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length in seconds. Negative when the bounds are inverted.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl From<(f64, f64)> for Interval {
    fn from((start, end): (f64, f64)) -> Self {
        Self { start, end }
    }
}

impl From<Interval> for (f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

/// Append `candidate`, or extend the last interval when the candidate's start
/// falls before the last interval's end.
///
/// The last interval's end is replaced, not maximized: callers scan left to
/// right so a later candidate always ends later.
pub fn push_or_merge(intervals: &mut IntervalList, candidate: Interval) {
    match intervals.last_mut() {
        Some(last) if last.end > candidate.start => last.end = candidate.end,
        _ => intervals.push(candidate),
    }
}
