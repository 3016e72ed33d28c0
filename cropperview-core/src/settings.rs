//! Persisted user settings.
//!
//! A flat JSON record mirroring the processing options plus the input and
//! output folders. Loading never fails: a missing, unreadable, or corrupt
//! file falls back to built-in defaults, and individual absent fields are
//! filled in per-field. There is no migration or versioning; the file is
//! rewritten verbatim at normal shutdown.

use crate::config::{CropRect, HandbrakeEncoder, SuperviewEncoder};
use crate::error::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed name of the settings file.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_input_folder")]
    pub input_folder: String,

    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Crop borders as a `top:bottom:left:right` string, kept in the
    /// format the original settings files used.
    #[serde(default = "default_crop_values")]
    pub crop_values: String,

    #[serde(default = "default_true")]
    pub enable_crop: bool,

    #[serde(default = "default_true")]
    pub enable_superview: bool,

    #[serde(default = "default_true")]
    pub combine_videos: bool,

    #[serde(default)]
    pub use_gpu_acceleration: bool,

    #[serde(default)]
    pub handbrake_encoder: HandbrakeEncoder,

    #[serde(default)]
    pub superview_encoder: SuperviewEncoder,
}

fn default_input_folder() -> String {
    "input_videos".to_string()
}

fn default_output_folder() -> String {
    "output_videos".to_string()
}

fn default_crop_values() -> String {
    "0:0:144:148".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_folder: default_input_folder(),
            output_folder: default_output_folder(),
            crop_values: default_crop_values(),
            enable_crop: true,
            enable_superview: true,
            combine_videos: true,
            use_gpu_acceleration: false,
            handbrake_encoder: HandbrakeEncoder::default(),
            superview_encoder: SuperviewEncoder::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults on any failure.
    ///
    /// Fields absent from the file take their individual defaults; a file
    /// that cannot be read or parsed is ignored entirely. Failures are
    /// logged, never surfaced.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                if path.exists() {
                    log::warn!("Could not read settings file {}: {}", path.display(), e);
                } else {
                    log::debug!("No settings file at {}, using defaults", path.display());
                }
                return Settings::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Could not parse settings file {}: {}; using defaults",
                    path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    /// Writes the settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::SettingsPersist(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| CoreError::SettingsPersist(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Parses the stored crop string, validating it against the
    /// `top:bottom:left:right` contract.
    pub fn crop_rect(&self) -> CoreResult<CropRect> {
        self.crop_values.parse()
    }
}
