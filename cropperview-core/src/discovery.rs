//! File discovery module for finding video files to process.
//!
//! Recursively scans a folder for files whose extension is on the video
//! allow-list (case-insensitive) and returns them in traversal order.
//! Explicitly picked file lists bypass discovery and are used verbatim.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as video files during folder scanning.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "wmv", "flv", "webm", "m4v", "ts",
];

/// Returns true if the path carries a recognized video extension.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Finds video files eligible for processing under the given folder.
///
/// The folder is walked recursively; regular files with an allow-listed
/// extension are returned in filesystem traversal order.
///
/// # Errors
///
/// * [`CoreError::FolderNotFound`] if the folder does not exist
/// * [`CoreError::Walkdir`] if traversal fails partway through
pub fn find_video_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(CoreError::FolderNotFound(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir) {
        let entry = entry?;
        if entry.file_type().is_file() && is_video_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    log::info!(
        "Found {} video file(s) in {}",
        files.len(),
        input_dir.display()
    );

    Ok(files)
}
