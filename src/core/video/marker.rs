use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::VideoError;

/// 帧标记 - 每一帧的颜色分类结果
///
/// `Content` is ordinary footage, `Keep` asks to retain the span before it
/// and `Drop` asks to discard it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMarker {
    Content,
    Keep,
    Drop,
}

impl FrameMarker {
    /// Single-letter code: `c` content, `y` keep, `n` drop.
    pub fn symbol(self) -> char {
        match self {
            FrameMarker::Content => 'c',
            FrameMarker::Keep => 'y',
            FrameMarker::Drop => 'n',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self, VideoError> {
        match symbol {
            'c' => Ok(FrameMarker::Content),
            'y' => Ok(FrameMarker::Keep),
            'n' => Ok(FrameMarker::Drop),
            other => Err(VideoError::InvalidMarker(other.to_string())),
        }
    }

    /// Parse a compact marker string such as `"ccyyccnnc"`.
    /// Whitespace is ignored.
    pub fn parse_sequence(code: &str) -> Result<Vec<Self>, VideoError> {
        code.chars()
            .filter(|c| !c.is_whitespace())
            .map(Self::from_symbol)
            .collect()
    }

    pub fn is_cue(self) -> bool {
        self != FrameMarker::Content
    }
}

impl FromStr for FrameMarker {
    type Err = VideoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "content" => Ok(FrameMarker::Content),
            "y" | "keep" => Ok(FrameMarker::Keep),
            "n" | "drop" => Ok(FrameMarker::Drop),
            _ => Err(VideoError::InvalidMarker(s.to_string())),
        }
    }
}

impl fmt::Display for FrameMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameMarker::Content => "content",
            FrameMarker::Keep => "keep",
            FrameMarker::Drop => "drop",
        };
        f.write_str(name)
    }
}
