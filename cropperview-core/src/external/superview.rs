//! superview-cli argument construction and invocation.
//!
//! The superview tool uses a short-flag convention (`/i`, `/o`, `/e`) and
//! shares no flags with HandBrake. The encoder flag is only passed when
//! GPU acceleration is enabled.

use crate::config::ProcessingConfig;
use crate::error::CoreResult;
use crate::external::command::{run_tool, LogSink};
use crate::external::handbrake::tool_dir;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Builds the argument list for a superview invocation.
pub fn superview_args(config: &ProcessingConfig, input: &Path, output: &Path) -> Vec<OsString> {
    let mut args = vec![
        OsString::from("/i"),
        input.into(),
        OsString::from("/o"),
        output.into(),
    ];
    if config.use_gpu {
        args.push(OsString::from("/e"));
        args.push(OsString::from(config.superview_encoder.as_str()));
    }
    args
}

/// Applies the lens transform to a single clip, producing
/// `<stem>-superview<ext>` in the temp directory.
pub fn apply(
    config: &ProcessingConfig,
    input: &Path,
    temp_dir: &Path,
    log: &mut LogSink<'_>,
) -> CoreResult<PathBuf> {
    let output = crate::utils::suffixed_sibling(temp_dir, input, "-superview");
    let args = superview_args(config, input, &output);
    run_tool(
        "superview-cli",
        &config.tools.superview,
        &args,
        tool_dir(&config.tools.superview),
        log,
    )?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HandbrakeEncoder, SuperviewEncoder, ToolPaths};

    fn test_config(use_gpu: bool) -> ProcessingConfig {
        ProcessingConfig {
            output_dir: PathBuf::from("out"),
            combine: false,
            crop: None,
            superview: true,
            use_gpu,
            handbrake_encoder: HandbrakeEncoder::X264,
            superview_encoder: SuperviewEncoder::HevcNvenc,
            tools: ToolPaths {
                handbrake: PathBuf::from("HandBrakeCLI"),
                superview: PathBuf::from("superview-cli"),
            },
        }
    }

    #[test]
    fn args_use_short_flag_convention() {
        let args = superview_args(&test_config(false), Path::new("in.mp4"), Path::new("o.mp4"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, vec!["/i", "in.mp4", "/o", "o.mp4"]);
    }

    #[test]
    fn gpu_run_appends_encoder_flag() {
        let args = superview_args(&test_config(true), Path::new("in.mp4"), Path::new("o.mp4"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args[4], "/e");
        assert_eq!(args[5], "hevc_nvenc");
    }
}
