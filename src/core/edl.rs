//! EDL (CMX3600 风格) 导出与解析
//!
//! Each kept interval becomes one event. Record timecodes run on a timeline
//! that starts at 01:00:00:00, which is where editors such as Resolve place
//! the first frame.

use std::fs;
use std::path::Path;

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::core::interval::Interval;

pub const TIMELINE_START_SECONDS: f64 = 3600.0;

static TIMECODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}):(\d{2,})$").expect("valid timecode regex"));

static EVENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{3,})\s+(\S+)\s+V\s+C\s+(\d+:\d{2}:\d{2}:\d+)\s+(\d+:\d{2}:\d{2}:\d+)\s+(\d+:\d{2}:\d{2}:\d+)\s+(\d+:\d{2}:\d{2}:\d+)\s*$",
    )
    .expect("valid event regex")
});

#[derive(Debug, Error)]
pub enum EdlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),
    #[error("Malformed timecode: {0:?}")]
    Timecode(String),
    #[error("Malformed EDL line {line}: {text:?}")]
    Line { line: usize, text: String },
}

/// Seconds to `HH:MM:SS:FF`. Every field is truncated, never rounded.
pub fn seconds_to_timecode(seconds: f64, fps: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds - hours * 3600.0) / 60.0).floor();
    let secs = (seconds - hours * 3600.0 - minutes * 60.0).floor();
    let frames = ((seconds - seconds.floor()) * fps).floor();
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        hours as i64, minutes as i64, secs as i64, frames as i64
    )
}

pub fn timecode_to_seconds(timecode: &str, fps: f64) -> Result<f64, EdlError> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(EdlError::InvalidFrameRate(fps));
    }
    let caps = TIMECODE_RE
        .captures(timecode.trim())
        .ok_or_else(|| EdlError::Timecode(timecode.to_string()))?;

    let field = |i: usize| -> Result<f64, EdlError> {
        caps[i]
            .parse::<u64>()
            .map(|v| v as f64)
            .map_err(|_| EdlError::Timecode(timecode.to_string()))
    };
    let (hours, minutes, secs, frames) = (field(1)?, field(2)?, field(3)?, field(4)?);
    if minutes >= 60.0 || secs >= 60.0 || frames >= fps.ceil() {
        return Err(EdlError::Timecode(timecode.to_string()));
    }

    Ok(hours * 3600.0 + minutes * 60.0 + secs + frames / fps)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdlEvent {
    pub number: usize,
    pub source: Interval,
    pub record: Interval,
}

/// An edit decision list for a single clip.
#[derive(Debug, Clone)]
pub struct Edl {
    pub title: String,
    pub clip_name: String,
    pub fps: f64,
    pub events: Vec<EdlEvent>,
}

impl Edl {
    pub fn from_intervals(intervals: &[Interval], clip_name: &str, fps: f64) -> Result<Self, EdlError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(EdlError::InvalidFrameRate(fps));
        }

        let mut record_cursor = TIMELINE_START_SECONDS;
        let events = intervals
            .iter()
            .filter(|iv| iv.end > iv.start)
            .enumerate()
            .map(|(i, source)| {
                let record_start = record_cursor;
                record_cursor += source.duration();
                EdlEvent {
                    number: i + 1,
                    source: *source,
                    record: Interval::new(record_start, record_cursor),
                }
            })
            .collect();

        Ok(Self {
            title: "Timeline 1".to_string(),
            clip_name: clip_name.to_string(),
            fps,
            events,
        })
    }

    pub fn render(&self) -> String {
        let mut out = format!("TITLE: {}\nFCM: NON-DROP FRAME\n", self.title);
        for event in &self.events {
            out.push_str(&format!(
                "{:03}  AX       V     C        {} {}  {}  {}\n",
                event.number,
                seconds_to_timecode(event.source.start, self.fps),
                seconds_to_timecode(event.source.end, self.fps),
                seconds_to_timecode(event.record.start, self.fps),
                seconds_to_timecode(event.record.end, self.fps),
            ));
            out.push_str(&format!("* FROM CLIP NAME: {}\n", self.clip_name));
        }
        out
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), EdlError> {
        let path = path.as_ref();
        info!("📝 Exporting EDL file: {} ({} events)", path.display(), self.events.len());
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Read back an EDL in the format [`Edl::render`] writes. Times come back
    /// at frame precision.
    pub fn parse(text: &str, fps: f64) -> Result<Self, EdlError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(EdlError::InvalidFrameRate(fps));
        }

        let mut title = String::new();
        let mut clip_name = String::new();
        let mut events = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("FCM:") {
                continue;
            }
            if let Some(rest) = line.strip_prefix("TITLE:") {
                title = rest.trim().to_string();
                continue;
            }
            if let Some(rest) = line.strip_prefix("* FROM CLIP NAME:") {
                clip_name = rest.trim().to_string();
                continue;
            }

            let bad_line = || EdlError::Line {
                line: idx + 1,
                text: raw.to_string(),
            };
            let caps = EVENT_RE.captures(line).ok_or_else(bad_line)?;
            let number = caps[1].parse::<usize>().map_err(|_| bad_line())?;
            let tc = |i: usize| timecode_to_seconds(&caps[i], fps);

            events.push(EdlEvent {
                number,
                source: Interval::new(tc(3)?, tc(4)?),
                record: Interval::new(tc(5)?, tc(6)?),
            });
        }

        Ok(Self {
            title,
            clip_name,
            fps,
            events,
        })
    }

    pub fn source_intervals(&self) -> Vec<Interval> {
        self.events.iter().map(|e| e.source).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timecode_truncates() {
        assert_eq!(seconds_to_timecode(0.0, 30.0), "00:00:00:00");
        assert_eq!(seconds_to_timecode(3600.0, 30.0), "01:00:00:00");
        assert_eq!(seconds_to_timecode(3723.5, 30.0), "01:02:03:15");
        // 0.999 s at 30 fps is frame 29, not 30
        assert_eq!(seconds_to_timecode(59.999, 30.0), "00:00:59:29");
    }

    #[test]
    fn test_timecode_to_seconds() {
        assert_eq!(timecode_to_seconds("01:02:03:15", 30.0).unwrap(), 3723.5);
        assert!(timecode_to_seconds("01:02:03", 30.0).is_err());
        assert!(timecode_to_seconds("00:61:00:00", 30.0).is_err());
        assert!(timecode_to_seconds("00:00:00:30", 30.0).is_err());
        assert!(timecode_to_seconds("00:00:00:00", 0.0).is_err());
    }

    #[test]
    fn test_render_runs_record_timeline_from_one_hour() {
        let intervals = vec![Interval::new(0.0, 1.0), Interval::new(7.0, 9.0)];
        let edl = Edl::from_intervals(&intervals, "take1.mp4", 30.0).unwrap();

        let expected = "TITLE: Timeline 1\n\
                        FCM: NON-DROP FRAME\n\
                        001  AX       V     C        00:00:00:00 00:00:01:00  01:00:00:00  01:00:01:00\n\
                        * FROM CLIP NAME: take1.mp4\n\
                        002  AX       V     C        00:00:07:00 00:00:09:00  01:00:01:00  01:00:03:00\n\
                        * FROM CLIP NAME: take1.mp4\n";
        assert_eq!(edl.render(), expected);
    }

    #[test]
    fn test_empty_and_inverted_intervals_skipped() {
        let intervals = vec![
            Interval::new(0.0, 1.0),
            Interval::new(3.0, 2.0),
            Interval::new(2.5, 2.5),
            Interval::new(4.0, 6.0),
        ];
        let edl = Edl::from_intervals(&intervals, "take1.mp4", 30.0).unwrap();

        assert_eq!(edl.events.len(), 2);
        assert_eq!(edl.events[1].number, 2);
        assert_eq!(edl.events[1].source, Interval::new(4.0, 6.0));
        assert_eq!(edl.events[1].record, Interval::new(3601.0, 3603.0));
    }

    #[test]
    fn test_record_timeline_never_rewinds_on_literal_markers() {
        use crate::core::timeline::total_duration;
        use crate::core::video::{extract_color_intervals, FrameMarker};

        let markers = FrameMarker::parse_sequence("cycnyccc").unwrap();
        let intervals = extract_color_intervals(&markers, 1.0).unwrap();
        assert!(intervals.iter().any(|iv| iv.start > iv.end), "{:?}", intervals);

        let edl = Edl::from_intervals(&intervals, "take1.mp4", 1.0).unwrap();
        let mut cursor = TIMELINE_START_SECONDS;
        for event in &edl.events {
            assert_eq!(event.record.start, cursor);
            assert!(event.record.end > event.record.start);
            cursor = event.record.end;
        }
        assert_eq!(cursor - TIMELINE_START_SECONDS, total_duration(&intervals));
    }

    #[test]
    fn test_write_and_parse() {
        let intervals = vec![Interval::new(0.5, 1.0), Interval::new(12.0, 15.0)];
        let edl = Edl::from_intervals(&intervals, "clip.mov", 30.0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mov.color.edl");
        edl.write_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed = Edl::parse(&text, 30.0).unwrap();
        assert_eq!(parsed.title, "Timeline 1");
        assert_eq!(parsed.clip_name, "clip.mov");
        assert_eq!(parsed.source_intervals(), intervals);
        assert_eq!(parsed.events[1].number, 2);
        assert_eq!(parsed.events[1].record, Interval::new(3600.5, 3603.5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Edl::parse("TITLE: x\nnot an event\n", 25.0).unwrap_err();
        assert!(matches!(err, EdlError::Line { line: 2, .. }));
    }

    #[test]
    fn test_invalid_fps() {
        assert!(Edl::from_intervals(&[], "a", 0.0).is_err());
    }
}
