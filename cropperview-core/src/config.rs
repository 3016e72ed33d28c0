// ============================================================================
// cropperview-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration values passed into the pipeline.
// The configuration is built once by the consumer (cropperview-cli), is
// immutable for the duration of a run, and is never mutated by the worker.

use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Quality value passed to HandBrake for every transcode invocation.
pub const HANDBRAKE_QUALITY: &str = "20";

/// Container format for combine and crop outputs.
pub const HANDBRAKE_FORMAT: &str = "mp4";

// ============================================================================
// CROP RECTANGLE
// ============================================================================

/// Fixed border sizes removed from every frame, in pixels.
///
/// Parsed from the `top:bottom:left:right` form used by HandBrake's
/// `--crop` flag; anything that is not exactly four non-negative integers
/// is rejected with [`CoreError::MalformedCropSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl FromStr for CropRect {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 4 {
            return Err(CoreError::MalformedCropSpec(s.to_string()));
        }
        let mut values = [0u32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| CoreError::MalformedCropSpec(s.to_string()))?;
        }
        Ok(CropRect {
            top: values[0],
            bottom: values[1],
            left: values[2],
            right: values[3],
        })
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.top, self.bottom, self.left, self.right
        )
    }
}

// ============================================================================
// ENCODER SELECTION
// ============================================================================

/// Encoder passed to HandBrake via `--encoder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandbrakeEncoder {
    #[serde(rename = "x264")]
    X264,
    #[serde(rename = "x265")]
    X265,
    #[serde(rename = "h264_nvenc")]
    H264Nvenc,
    #[serde(rename = "hevc_nvenc")]
    HevcNvenc,
    #[serde(rename = "h264_qsv")]
    H264Qsv,
    #[serde(rename = "hevc_qsv")]
    HevcQsv,
}

impl HandbrakeEncoder {
    /// The literal string HandBrake expects on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            HandbrakeEncoder::X264 => "x264",
            HandbrakeEncoder::X265 => "x265",
            HandbrakeEncoder::H264Nvenc => "h264_nvenc",
            HandbrakeEncoder::HevcNvenc => "hevc_nvenc",
            HandbrakeEncoder::H264Qsv => "h264_qsv",
            HandbrakeEncoder::HevcQsv => "hevc_qsv",
        }
    }

    /// True for encoders that run on GPU hardware (NVENC, QSV).
    pub fn is_hardware(self) -> bool {
        !matches!(self, HandbrakeEncoder::X264 | HandbrakeEncoder::X265)
    }
}

impl Default for HandbrakeEncoder {
    fn default() -> Self {
        HandbrakeEncoder::X264
    }
}

impl fmt::Display for HandbrakeEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandbrakeEncoder {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "x264" => Ok(HandbrakeEncoder::X264),
            "x265" => Ok(HandbrakeEncoder::X265),
            "h264_nvenc" => Ok(HandbrakeEncoder::H264Nvenc),
            "hevc_nvenc" => Ok(HandbrakeEncoder::HevcNvenc),
            "h264_qsv" => Ok(HandbrakeEncoder::H264Qsv),
            "hevc_qsv" => Ok(HandbrakeEncoder::HevcQsv),
            other => Err(CoreError::OperationFailed(format!(
                "Unknown HandBrake encoder '{}'",
                other
            ))),
        }
    }
}

/// Encoder passed to the superview tool via `/e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuperviewEncoder {
    #[serde(rename = "libx264")]
    Libx264,
    #[serde(rename = "libx265")]
    Libx265,
    #[serde(rename = "h264_nvenc")]
    H264Nvenc,
    #[serde(rename = "hevc_nvenc")]
    HevcNvenc,
    #[serde(rename = "h264_qsv")]
    H264Qsv,
    #[serde(rename = "hevc_qsv")]
    HevcQsv,
}

impl SuperviewEncoder {
    pub fn as_str(self) -> &'static str {
        match self {
            SuperviewEncoder::Libx264 => "libx264",
            SuperviewEncoder::Libx265 => "libx265",
            SuperviewEncoder::H264Nvenc => "h264_nvenc",
            SuperviewEncoder::HevcNvenc => "hevc_nvenc",
            SuperviewEncoder::H264Qsv => "h264_qsv",
            SuperviewEncoder::HevcQsv => "hevc_qsv",
        }
    }
}

impl Default for SuperviewEncoder {
    fn default() -> Self {
        SuperviewEncoder::Libx264
    }
}

impl fmt::Display for SuperviewEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuperviewEncoder {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "libx264" => Ok(SuperviewEncoder::Libx264),
            "libx265" => Ok(SuperviewEncoder::Libx265),
            "h264_nvenc" => Ok(SuperviewEncoder::H264Nvenc),
            "hevc_nvenc" => Ok(SuperviewEncoder::HevcNvenc),
            "h264_qsv" => Ok(SuperviewEncoder::H264Qsv),
            "hevc_qsv" => Ok(SuperviewEncoder::HevcQsv),
            other => Err(CoreError::OperationFailed(format!(
                "Unknown superview encoder '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// TOOL LOCATIONS
// ============================================================================

/// Paths to the two external executables the pipeline shells out to.
///
/// The default resolves both tools next to the running binary, which is
/// where release bundles place them.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub handbrake: PathBuf,
    pub superview: PathBuf,
}

impl ToolPaths {
    /// Resolves tool paths relative to the directory containing `exe`.
    pub fn beside(exe_dir: &Path) -> Self {
        ToolPaths {
            handbrake: exe_dir.join(exe_name("HandBrakeCLI")),
            superview: exe_dir.join(exe_name("superview-cli")),
        }
    }
}

fn exe_name(base: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", base)
    } else {
        base.to_string()
    }
}

// ============================================================================
// PROCESSING CONFIGURATION
// ============================================================================

/// Immutable configuration for a single pipeline run.
///
/// Built by the consumer (e.g. cropperview-cli) from persisted settings and
/// command-line overrides, then handed to [`crate::pipeline::process_videos`].
/// The worker thread never mutates it, so no synchronization is needed
/// between the pipeline and whoever is observing progress.
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Directory where finished files are placed.
    pub output_dir: PathBuf,

    /// Concatenate all inputs into a single clip before the per-file stages.
    /// Only takes effect when more than one input file is present.
    pub combine: bool,

    /// Border crop to apply; `None` disables the crop stage.
    pub crop: Option<CropRect>,

    /// Apply the superview lens transform.
    pub superview: bool,

    /// Pass GPU-specific options to the external tools.
    pub use_gpu: bool,

    /// Encoder used for combine and crop transcodes.
    pub handbrake_encoder: HandbrakeEncoder,

    /// Encoder handed to the superview tool when `use_gpu` is set.
    pub superview_encoder: SuperviewEncoder,

    /// Locations of the external executables.
    pub tools: ToolPaths,
}
