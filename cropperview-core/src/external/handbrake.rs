//! HandBrakeCLI argument construction and invocation.
//!
//! HandBrake covers two pipeline stages: combining multiple clips (driven
//! by a newline-delimited manifest file) and border cropping. Both share
//! the same container/encoder/quality flags.

use crate::config::{ProcessingConfig, CropRect, HANDBRAKE_FORMAT, HANDBRAKE_QUALITY};
use crate::error::CoreResult;
use crate::external::command::{run_tool, LogSink};

use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the concat manifest written into the temp directory.
const MANIFEST_NAME: &str = "file_list.txt";

/// Writes the concat manifest HandBrake reads via `--input-list`.
///
/// One `file '<path>'` line per input, in processing order.
pub fn write_concat_manifest(temp_dir: &Path, files: &[PathBuf]) -> CoreResult<PathBuf> {
    let manifest_path = temp_dir.join(MANIFEST_NAME);
    let mut manifest = File::create(&manifest_path)?;
    for file in files {
        writeln!(manifest, "file '{}'", file.display())?;
    }
    Ok(manifest_path)
}

/// Builds the argument list for a combine invocation.
pub fn combine_args(
    config: &ProcessingConfig,
    manifest: &Path,
    output: &Path,
) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("--input-list"),
        manifest.into(),
        OsString::from("--output"),
        output.into(),
    ];
    args.extend(shared_transcode_args(config));
    args
}

/// Builds the argument list for a crop invocation.
pub fn crop_args(
    config: &ProcessingConfig,
    rect: CropRect,
    input: &Path,
    output: &Path,
) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("--input"),
        input.into(),
        OsString::from("--output"),
        output.into(),
    ];
    args.extend(shared_transcode_args(config));
    args.push(OsString::from("--crop"));
    args.push(OsString::from(rect.to_string()));
    args
}

/// Flags common to every HandBrake transcode: container, encoder, quality,
/// plus the fast preset when a hardware encoder is in use.
fn shared_transcode_args(config: &ProcessingConfig) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("--format"),
        OsString::from(HANDBRAKE_FORMAT),
        OsString::from("--encoder"),
        OsString::from(config.handbrake_encoder.as_str()),
        OsString::from("--quality"),
        OsString::from(HANDBRAKE_QUALITY),
    ];
    if config.use_gpu && config.handbrake_encoder.is_hardware() {
        args.push(OsString::from("--encopts"));
        args.push(OsString::from("preset=fast"));
    }
    args
}

/// Concatenates the given clips into `<temp_dir>/combined.mp4`.
pub fn combine(
    config: &ProcessingConfig,
    files: &[PathBuf],
    temp_dir: &Path,
    log: &mut LogSink<'_>,
) -> CoreResult<PathBuf> {
    let manifest = write_concat_manifest(temp_dir, files)?;
    let output = temp_dir.join(format!("combined.{}", HANDBRAKE_FORMAT));
    let args = combine_args(config, &manifest, &output);
    run_tool(
        "HandBrakeCLI",
        &config.tools.handbrake,
        &args,
        tool_dir(&config.tools.handbrake),
        log,
    )?;
    Ok(output)
}

/// Crops borders off a single clip, producing `<stem>-cropped<ext>` in the
/// temp directory.
pub fn crop(
    config: &ProcessingConfig,
    rect: CropRect,
    input: &Path,
    temp_dir: &Path,
    log: &mut LogSink<'_>,
) -> CoreResult<PathBuf> {
    let output = crate::utils::suffixed_sibling(temp_dir, input, "-cropped");
    let args = crop_args(config, rect, input, &output);
    run_tool(
        "HandBrakeCLI",
        &config.tools.handbrake,
        &args,
        tool_dir(&config.tools.handbrake),
        log,
    )?;
    Ok(output)
}

/// Tools are launched with their own directory as the working directory,
/// matching how they are bundled next to the application.
pub(crate) fn tool_dir(tool_path: &Path) -> &Path {
    tool_path.parent().unwrap_or_else(|| Path::new("."))
}
