// cropperview-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Cropperview: batch processing for action-camera footage",
    long_about = "Combines, crops, and superview-transforms video clips by \
                  driving the bundled HandBrakeCLI and superview-cli executables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the processing pipeline over a folder or explicit files
    Process(ProcessArgs),
    /// Lists the video files a folder scan would pick up
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Input folder to scan, or explicit video files in processing order.
    /// Defaults to the saved input folder.
    #[arg(value_name = "PATHS")]
    pub inputs: Vec<PathBuf>,

    /// Directory where finished files are saved (defaults to the saved output folder)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Combine multiple inputs into one clip before the per-file stages
    #[arg(long, conflicts_with = "no_combine")]
    pub combine: bool,
    /// Process every input separately even when multiple are present
    #[arg(long)]
    pub no_combine: bool,

    /// Crop borders, as TOP:BOTTOM:LEFT:RIGHT pixels
    #[arg(long, value_name = "TOP:BOTTOM:LEFT:RIGHT", conflicts_with = "no_crop")]
    pub crop: Option<String>,
    /// Skip the crop stage
    #[arg(long)]
    pub no_crop: bool,

    /// Apply the superview lens transform
    #[arg(long, conflicts_with = "no_superview")]
    pub superview: bool,
    /// Skip the superview stage
    #[arg(long)]
    pub no_superview: bool,

    /// Pass GPU acceleration options to the external tools
    #[arg(long, conflicts_with = "no_gpu")]
    pub gpu: bool,
    /// Force software encoding options
    #[arg(long)]
    pub no_gpu: bool,

    /// Encoder for combine and crop transcodes
    /// (x264, x265, h264_nvenc, hevc_nvenc, h264_qsv, hevc_qsv)
    #[arg(long, value_name = "ENCODER")]
    pub handbrake_encoder: Option<String>,

    /// Encoder for the superview tool
    /// (libx264, libx265, h264_nvenc, hevc_nvenc, h264_qsv, hevc_qsv)
    #[arg(long, value_name = "ENCODER")]
    pub superview_encoder: Option<String>,

    /// Path to the HandBrakeCLI executable (defaults to beside this binary)
    #[arg(long, value_name = "PATH")]
    pub handbrake_path: Option<PathBuf>,

    /// Path to the superview-cli executable (defaults to beside this binary)
    #[arg(long, value_name = "PATH")]
    pub superview_path: Option<PathBuf>,

    /// Settings file to load and save (defaults to ./settings.json)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Directory for run log files (defaults to OUTPUT_DIR/logs)
    #[arg(long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Folder to scan recursively for video files
    #[arg(required = true, value_name = "FOLDER")]
    pub folder: PathBuf,
}
