//! 静音标记 → 说话区间
//!
//! Each pair of adjacent window flags `(prev, curr)` at position `i` is one
//! step. A speaking span opens on silent→speaking and is emitted, padded by
//! `ease_in` on both sides, on speaking→silent. A span still open when the
//! flags run out is dropped.

use log::debug;

use super::error::AudioError;
use super::silence::validate_window_size;
use crate::core::interval::{push_or_merge, Interval, IntervalList};

#[derive(Debug, Default)]
struct SpeakingAccumulator {
    speaking_start: f64,
    intervals: IntervalList,
}

impl SpeakingAccumulator {
    fn step(mut self, i: usize, prev_silent: bool, curr_silent: bool, window_size: f64, ease_in: f64) -> Self {
        match (prev_silent, curr_silent) {
            (true, false) => self.speaking_start = (i + 1) as f64 * window_size,
            (false, true) => {
                let speaking_end = i as f64 * window_size;
                let candidate = Interval::new(
                    (self.speaking_start - ease_in).max(0.0),
                    speaking_end + ease_in,
                );
                // Padding on small windows can reach back into the previous span.
                push_or_merge(&mut self.intervals, candidate);
            }
            _ => {}
        }
        self
    }
}

pub fn validate_ease_in(ease_in: f64) -> Result<f64, AudioError> {
    if ease_in.is_finite() && ease_in >= 0.0 {
        Ok(ease_in)
    } else {
        Err(AudioError::InvalidParameter(format!(
            "ease_in must be non-negative, got {}",
            ease_in
        )))
    }
}

pub fn extract_speaking_intervals(
    is_silent: &[bool],
    window_size: f64,
    ease_in: f64,
) -> Result<IntervalList, AudioError> {
    let window_size = validate_window_size(window_size)?;
    let ease_in = validate_ease_in(ease_in)?;

    let intervals = is_silent
        .windows(2)
        .enumerate()
        .fold(SpeakingAccumulator::default(), |acc, (i, pair)| {
            acc.step(i, pair[0], pair[1], window_size, ease_in)
        })
        .intervals;

    debug!(
        "🗣️ {} windows of {:.3}s (ease-in {:.3}s) -> {} speaking intervals",
        is_silent.len(),
        window_size,
        ease_in,
        intervals.len()
    );
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(code: &str) -> Vec<bool> {
        // '.' silent, '#' speaking
        code.chars().map(|c| c == '.').collect()
    }

    #[test]
    fn test_single_span_without_padding() {
        let intervals = extract_speaking_intervals(&flags(".##.."), 1.0, 0.0).unwrap();
        assert_eq!(intervals, vec![Interval::new(1.0, 2.0)]);
    }

    #[test]
    fn test_padding_overlap_merges() {
        let intervals = extract_speaking_intervals(&flags(".##.##."), 1.0, 1.5).unwrap();
        assert_eq!(intervals, vec![Interval::new(0.0, 6.5)]);
    }

    #[test]
    fn test_padding_without_overlap_keeps_two() {
        let intervals = extract_speaking_intervals(&flags(".##.##."), 1.0, 0.5).unwrap();
        assert_eq!(
            intervals,
            vec![Interval::new(0.5, 2.5), Interval::new(3.5, 5.5)]
        );
    }

    #[test]
    fn test_start_clamped_at_zero() {
        let intervals = extract_speaking_intervals(&flags("##."), 1.0, 0.5).unwrap();
        assert_eq!(intervals, vec![Interval::new(0.0, 1.5)]);
    }

    #[test]
    fn test_no_transition_yields_nothing() {
        for code in ["", ".", "#", "......", "######"] {
            assert!(
                extract_speaking_intervals(&flags(code), 0.1, 0.1).unwrap().is_empty(),
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_trailing_speech_is_dropped() {
        let intervals = extract_speaking_intervals(&flags(".#..###"), 1.0, 0.0).unwrap();
        assert_eq!(intervals, vec![Interval::new(1.0, 1.0)]);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(extract_speaking_intervals(&flags(".#."), 0.0, 0.1).is_err());
        assert!(extract_speaking_intervals(&flags(".#."), f64::NAN, 0.1).is_err());
        assert!(extract_speaking_intervals(&flags(".#."), 0.1, -0.1).is_err());
    }

    #[test]
    fn test_output_is_ordered_and_disjoint() {
        let code = "..###...#.....####..#..##......#";
        let intervals = extract_speaking_intervals(&flags(code), 0.1, 0.1).unwrap();
        assert!(!intervals.is_empty());
        for pair in intervals.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for interval in &intervals {
            assert!(interval.start >= 0.0);
            assert!(interval.start <= interval.end);
        }
    }
}
