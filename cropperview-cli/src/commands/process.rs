//! Implementation of the 'process' subcommand.
//!
//! Loads persisted settings, applies command-line overrides, resolves the
//! input file set, runs the core pipeline, and saves the effective
//! configuration back on normal exit.

use crate::cli::ProcessArgs;
use crate::logging::RunLog;

use cropperview_core::{
    find_video_files, format_duration, process_videos, CancelToken, CoreError, CoreResult,
    CropRect, FileReport, ProcessingConfig, Settings, ToolPaths, SETTINGS_FILE_NAME,
};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};

pub fn run(args: ProcessArgs) -> CoreResult<()> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME));
    let mut settings = Settings::load(&settings_path);

    // ---- Resolve the effective configuration (flags override settings) ----
    let combine = resolve_toggle(args.combine, args.no_combine, settings.combine_videos);
    let superview = resolve_toggle(args.superview, args.no_superview, settings.enable_superview);
    let use_gpu = resolve_toggle(args.gpu, args.no_gpu, settings.use_gpu_acceleration);

    let crop_enabled = !args.no_crop && (args.crop.is_some() || settings.enable_crop);
    let crop_values = args
        .crop
        .clone()
        .unwrap_or_else(|| settings.crop_values.clone());
    // Validated up front so a malformed spec fails before anything spawns.
    let crop: Option<CropRect> = if crop_enabled {
        Some(crop_values.parse()?)
    } else {
        None
    };

    let handbrake_encoder = match &args.handbrake_encoder {
        Some(name) => name.parse()?,
        None => settings.handbrake_encoder,
    };
    let superview_encoder = match &args.superview_encoder {
        Some(name) => name.parse()?,
        None => settings.superview_encoder,
    };

    let (files, input_folder) = resolve_inputs(&args, &settings)?;
    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.output_folder));

    let mut tools = ToolPaths::beside(&exe_dir());
    if let Some(path) = args.handbrake_path.clone() {
        tools.handbrake = path;
    }
    if let Some(path) = args.superview_path.clone() {
        tools.superview = path;
    }

    let config = ProcessingConfig {
        output_dir: output_dir.clone(),
        combine,
        crop,
        superview,
        use_gpu,
        handbrake_encoder,
        superview_encoder,
        tools,
    };

    // ---- Run log and progress surface ----
    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| output_dir.join("logs"));
    let mut run_log = RunLog::create(&log_dir)?;

    info!("Processing {} video file(s)", files.len());
    info!("Output directory: {}", output_dir.display());
    info!("Run log file: {}", run_log.path().display());

    let bar = ProgressBar::new(100);
    if let Ok(bar_style) =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}%")
    {
        bar.set_style(bar_style.progress_chars("##-"));
    }

    let started = Instant::now();
    let result = {
        let mut sink = |line: &str| {
            run_log.write_line(line);
            log::debug!("{}", line);
        };
        process_videos(&config, &files, &CancelToken::new(), &mut sink, &mut |p| {
            bar.set_position(p.round() as u64)
        })
    };
    run_log.flush();

    let reports = match result {
        Ok(reports) => {
            bar.finish_and_clear();
            reports
        }
        Err(e) => {
            bar.abandon();
            return Err(e);
        }
    };

    print_summary(&reports, started.elapsed());

    // ---- Persist the effective configuration at normal exit ----
    settings.input_folder = input_folder;
    settings.output_folder = output_dir.to_string_lossy().into_owned();
    settings.combine_videos = combine;
    settings.enable_crop = crop_enabled;
    settings.crop_values = crop_values;
    settings.enable_superview = superview;
    settings.use_gpu_acceleration = use_gpu;
    settings.handbrake_encoder = handbrake_encoder;
    settings.superview_encoder = superview_encoder;
    if let Err(e) = settings.save(&settings_path) {
        warn!("Could not save settings: {}", e);
    }

    Ok(())
}

/// Resolves the input file set and the folder to remember in settings.
///
/// A single directory argument (or no argument, falling back to the saved
/// input folder) is scanned recursively; explicit file arguments are used
/// verbatim in the given order, with no existence re-check.
fn resolve_inputs(args: &ProcessArgs, settings: &Settings) -> CoreResult<(Vec<PathBuf>, String)> {
    if args.inputs.is_empty() {
        let folder = PathBuf::from(&settings.input_folder);
        let files = find_video_files(&folder)?;
        return Ok((files, settings.input_folder.clone()));
    }

    if args.inputs.len() == 1 && args.inputs[0].is_dir() {
        let folder = &args.inputs[0];
        let files = find_video_files(folder)?;
        return Ok((files, folder.to_string_lossy().into_owned()));
    }

    let files = args.inputs.clone();
    let folder = files[0]
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| settings.input_folder.clone());
    Ok((files, folder))
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve_toggle(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

fn print_summary(reports: &[FileReport], total: std::time::Duration) {
    println!("{}", style("Processing Summary:").bold());
    for report in reports {
        let stages = if report.stages.is_empty() {
            "copied".to_string()
        } else {
            report
                .stages
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "  {} ({}, {})",
            style(report.output.display()).green(),
            stages,
            format_duration(report.duration)
        );
    }
    println!(
        "Processed {} file(s) in {}",
        style(reports.len()).bold(),
        format_duration(total)
    );
}
