//! Core library for batch processing action-camera footage.
//!
//! This crate provides video file discovery, a sequential three-stage
//! pipeline (combine, crop, superview) that delegates all video work to
//! two external executables, and persistence for user settings.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use cropperview_core::{
//!     CancelToken, HandbrakeEncoder, ProcessingConfig, SuperviewEncoder, ToolPaths,
//! };
//! use std::path::{Path, PathBuf};
//!
//! let config = ProcessingConfig {
//!     output_dir: PathBuf::from("/path/to/output"),
//!     combine: true,
//!     crop: Some("0:0:144:148".parse().unwrap()),
//!     superview: true,
//!     use_gpu: false,
//!     handbrake_encoder: HandbrakeEncoder::X264,
//!     superview_encoder: SuperviewEncoder::Libx264,
//!     tools: ToolPaths::beside(Path::new(".")),
//! };
//!
//! let files = cropperview_core::find_video_files(Path::new("/path/to/input")).unwrap();
//! let reports = cropperview_core::process_videos(
//!     &config,
//!     &files,
//!     &CancelToken::new(),
//!     &mut |line| println!("{line}"),
//!     &mut |percent| println!("{percent:.0}%"),
//! ).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod progress;
pub mod settings;
pub mod utils;

// Re-exports for public API
pub use config::{CropRect, HandbrakeEncoder, ProcessingConfig, SuperviewEncoder, ToolPaths};
pub use discovery::{find_video_files, is_video_file, VIDEO_EXTENSIONS};
pub use error::{CoreError, CoreResult};
pub use pipeline::{output_file_name, process_videos, CancelToken, FileReport, Stage};
pub use progress::PipelineState;
pub use settings::{Settings, SETTINGS_FILE_NAME};
pub use utils::format_duration;
