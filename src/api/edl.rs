//! EDL 导出

use std::path::{Path, PathBuf};

use crate::core::edl::{Edl, EdlError};
use crate::core::interval::Interval;

/// Write `intervals` as an EDL for `clip_name` and return what was written.
pub fn export_edl<P: AsRef<Path>>(
    intervals: &[Interval],
    clip_name: &str,
    path: P,
    fps: f64,
) -> Result<Edl, EdlError> {
    let edl = Edl::from_intervals(intervals, clip_name, fps)?;
    edl.write_to(path)?;
    Ok(edl)
}

/// `<dir>/<clip>.color.edl` and `<dir>/<clip>.speaking.edl` next to the input.
pub fn edl_paths(input: &Path) -> (PathBuf, PathBuf) {
    let clip_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    (
        dir.join(format!("{}.color.edl", clip_name)),
        dir.join(format!("{}.speaking.edl", clip_name)),
    )
}
