//! 时间线运算 - 区间求补、切片与两次剪辑的组合

use crate::core::interval::{Interval, IntervalList};

/// Running length of the edited timeline. Inverted intervals count as zero.
pub fn total_duration(intervals: &[Interval]) -> f64 {
    intervals.iter().map(|iv| iv.duration().max(0.0)).sum()
}

/// Spans of `[0, duration]` not covered by `intervals`.
///
/// Input is expected in timeline order; inverted or overlapping intervals
/// only ever shrink the result, they never produce a negative span.
pub fn excluded_intervals(intervals: &[Interval], duration: f64) -> IntervalList {
    let mut excluded = Vec::new();
    let mut cursor = 0.0f64;

    for iv in intervals {
        let gap_end = iv.start.min(duration);
        if gap_end > cursor {
            excluded.push(Interval::new(cursor, gap_end));
            cursor = gap_end;
        }
        cursor = cursor.max(iv.end);
    }
    if duration > cursor {
        excluded.push(Interval::new(cursor, duration));
    }
    excluded
}

/// Concatenate the items inside each interval, treating item `k` as time
/// `k / rate`. Bounds round to the nearest index and are end-exclusive.
pub fn slice_by_intervals<T: Clone>(items: &[T], intervals: &[Interval], rate: f64) -> Vec<T> {
    let to_index = |t: f64| ((t * rate).round().max(0.0) as usize).min(items.len());

    intervals
        .iter()
        .flat_map(|iv| {
            let start = to_index(iv.start);
            let end = to_index(iv.end).max(start);
            items[start..end].iter().cloned()
        })
        .collect()
}

/// Map `inner`, expressed on the timeline produced by concatenating `outer`,
/// back to source time.
///
/// An inner interval that straddles a cut in `outer` is split into one
/// source interval per piece.
pub fn compose(outer: &[Interval], inner: &[Interval]) -> IntervalList {
    let mut segments = Vec::with_capacity(outer.len());
    let mut offset = 0.0;
    for iv in outer {
        let len = iv.duration().max(0.0);
        segments.push((offset, offset + len, iv.start));
        offset += len;
    }

    let mut composed = Vec::new();
    for iv in inner {
        for &(seg_start, seg_end, source_start) in &segments {
            let lo = iv.start.max(seg_start);
            let hi = iv.end.min(seg_end);
            if lo < hi {
                composed.push(Interval::new(
                    source_start + (lo - seg_start),
                    source_start + (hi - seg_start),
                ));
            }
        }
    }
    composed
}
