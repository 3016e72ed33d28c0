//! Pipeline orchestration: combine, crop, superview, finalize, cleanup.
//!
//! A run walks a fixed sequence of stages, each independently enabled by
//! the configuration. Every stage delegates the actual video work to an
//! external tool; this module only moves artifacts through a temporary
//! directory and renames the final one into the output folder.
//!
//! Stages run strictly sequentially, one external process at a time. Any
//! tool failure aborts the whole run; nothing is retried and remaining
//! files are not attempted. The temp directory is removed on success only,
//! so a failed run leaves its intermediates behind for inspection.

use crate::config::ProcessingConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::command::LogSink;
use crate::external::{handbrake, superview};
use crate::progress::PipelineState;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::Builder as TempFileBuilder;

/// One processing stage of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Combine,
    Crop,
    Superview,
}

impl Stage {
    /// Suffix appended to the output filename when this stage ran.
    pub fn suffix(self) -> &'static str {
        match self {
            Stage::Combine => "-combined",
            Stage::Crop => "-cropped",
            Stage::Superview => "-superview",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Combine => f.write_str("combine"),
            Stage::Crop => f.write_str("crop"),
            Stage::Superview => f.write_str("superview"),
        }
    }
}

/// Cooperative cancellation flag, checked between stages.
///
/// External tools are never killed mid-flight; a cancelled run stops at
/// the next stage boundary with [`CoreError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> CoreResult<()> {
        if self.is_cancelled() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Outcome of one finished file, returned for the run summary.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Original input (the first input for a combined run).
    pub source: PathBuf,
    /// Final file placed in the output directory.
    pub output: PathBuf,
    /// Stages that actually ran for this file.
    pub stages: Vec<Stage>,
    /// Wall time spent on this file's stages.
    pub duration: Duration,
}

/// Builds the final output filename for an input: the stem plus the suffix
/// of every stage that ran, in fixed order, keeping the input's extension.
pub fn output_file_name(input: &Path, stages: &[Stage]) -> String {
    let mut name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    for stage in stages {
        name.push_str(stage.suffix());
    }
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    name
}

/// Runs the full pipeline over the given files.
///
/// `files` is the ordered set to process (discovery order or the user's
/// pick order); it must be non-empty. Output lines from the external tools
/// and the pipeline's own status messages go to `log`; `progress` receives
/// the 0-100 value after the combine step and after each finished file.
///
/// Returns one [`FileReport`] per finished output file. The first error
/// aborts the run and is returned as-is; in that case the temp directory
/// is deliberately left on disk.
pub fn process_videos(
    config: &ProcessingConfig,
    files: &[PathBuf],
    cancel: &CancelToken,
    log: &mut LogSink<'_>,
    progress: &mut dyn FnMut(f64),
) -> CoreResult<Vec<FileReport>> {
    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    std::fs::create_dir_all(&config.output_dir)?;

    // The temp dir is owned manually rather than Drop-cleaned: a failed run
    // must leave its intermediates behind.
    let temp_dir = TempFileBuilder::new()
        .prefix("cropperview_")
        .tempdir_in(&config.output_dir)?
        .keep();

    let result = run_stages(config, files, &temp_dir, cancel, log, progress);

    if result.is_ok() {
        if let Err(e) = std::fs::remove_dir_all(&temp_dir) {
            log::warn!(
                "Could not remove temp directory {}: {}",
                temp_dir.display(),
                e
            );
        }
    }

    result
}

fn run_stages(
    config: &ProcessingConfig,
    files: &[PathBuf],
    temp_dir: &Path,
    cancel: &CancelToken,
    log: &mut LogSink<'_>,
    progress: &mut dyn FnMut(f64),
) -> CoreResult<Vec<FileReport>> {
    let combining = config.combine && files.len() > 1;
    let mut state = PipelineState::new(if combining { 1 } else { files.len() }, combining);
    let mut reports = Vec::new();

    // Combining: replaces the per-file list with the single combined clip.
    // The first input lends its name to the final artifact.
    let work_items: Vec<(PathBuf, PathBuf)> = if combining {
        log(&format!("Combining {} videos...", files.len()));
        let combined = handbrake::combine(config, files, temp_dir, log)?;
        state.advance();
        progress(state.percent());
        vec![(files[0].clone(), combined)]
    } else {
        files.iter().map(|f| (f.clone(), f.clone())).collect()
    };

    for (index, (source, start)) in work_items.iter().enumerate() {
        cancel.check()?;
        let started = Instant::now();
        log(&format!(
            "Processing file {}/{}: {}",
            index + 1,
            work_items.len(),
            file_name(start)
        ));

        let mut stages = Vec::new();
        if combining {
            stages.push(Stage::Combine);
        }
        let mut current = start.clone();

        if let Some(rect) = config.crop {
            log(&format!("Cropping {} ({})...", file_name(&current), rect));
            current = handbrake::crop(config, rect, &current, temp_dir, log)?;
            stages.push(Stage::Crop);
            cancel.check()?;
        }

        if config.superview {
            log(&format!("Applying superview to {}...", file_name(&current)));
            current = superview::apply(config, &current, temp_dir, log)?;
            stages.push(Stage::Superview);
            cancel.check()?;
        }

        // Finalizing: the last intermediate moves into the output folder
        // under the assembled name. When no stage ran the original is
        // copied rather than moved out of the user's input folder.
        let final_path = config.output_dir.join(output_file_name(source, &stages));
        if current == *start && !combining {
            std::fs::copy(&current, &final_path)?;
        } else {
            move_file(&current, &final_path)?;
        }
        log(&format!("Final file saved: {}", file_name(&final_path)));

        reports.push(FileReport {
            source: source.clone(),
            output: final_path,
            stages,
            duration: started.elapsed(),
        });

        state.advance();
        progress(state.percent());
    }

    log("Processing completed successfully");
    Ok(reports)
}

/// Renames across the same filesystem, falling back to copy-and-delete.
fn move_file(from: &Path, to: &Path) -> CoreResult<()> {
    if std::fs::rename(from, to).is_err() {
        std::fs::copy(from, to)?;
        std::fs::remove_file(from)?;
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_single_file_crop_and_superview() {
        let name = output_file_name(Path::new("clip.mp4"), &[Stage::Crop, Stage::Superview]);
        assert_eq!(name, "clip-cropped-superview.mp4");
    }

    #[test]
    fn output_name_combined_run_uses_all_suffixes() {
        let name = output_file_name(
            Path::new("/in/GX010001.MP4"),
            &[Stage::Combine, Stage::Crop, Stage::Superview],
        );
        assert_eq!(name, "GX010001-combined-cropped-superview.MP4");
    }

    #[test]
    fn output_name_without_stages_keeps_original_name() {
        assert_eq!(output_file_name(Path::new("clip.mp4"), &[]), "clip.mp4");
    }

    #[test]
    fn cancel_token_trips_between_stages() {
        let token = CancelToken::new();
        assert!(token.check().is_ok());
        token.cancel();
        assert!(matches!(token.check(), Err(CoreError::Cancelled)));
    }
}
