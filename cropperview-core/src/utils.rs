//! Small shared helpers.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Places `input`'s filename into `dir` with `suffix` appended to the stem,
/// preserving the original extension: `clip.mp4` + `-cropped` becomes
/// `<dir>/clip-cropped.mp4`.
pub fn suffixed_sibling(dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    dir.join(format!("{}{}{}", stem, suffix, ext))
}

/// Formats a duration as `HH:MM:SS` for run summaries.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
