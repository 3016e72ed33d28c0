// cropperview-core/tests/pipeline_tests.rs
//
// End-to-end pipeline tests using small shell scripts in place of the real
// HandBrakeCLI and superview-cli executables.

#![cfg(unix)]

use cropperview_core::{
    process_videos, CancelToken, CoreError, HandbrakeEncoder, ProcessingConfig, Stage,
    SuperviewEncoder, ToolPaths,
};
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Fake HandBrake: echoes its arguments and writes the `--output` file.
const FAKE_HANDBRAKE: &str = r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--output" ]; then out="$a"; fi
  prev="$a"
done
echo "fake handbrake $@"
echo "transcoded" > "$out"
"#;

/// Fake superview: writes the `/o` file.
const FAKE_SUPERVIEW: &str = r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "/o" ]; then out="$a"; fi
  prev="$a"
done
echo "fake superview $@"
echo "stretched" > "$out"
"#;

const FAILING_TOOL: &str = "#!/bin/sh\necho \"boom\" >&2\nexit 2\n";

fn write_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(script.as_bytes()).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn make_config(tool_dir: &Path, output_dir: &Path) -> ProcessingConfig {
    ProcessingConfig {
        output_dir: output_dir.to_path_buf(),
        combine: false,
        crop: None,
        superview: false,
        use_gpu: false,
        handbrake_encoder: HandbrakeEncoder::X264,
        superview_encoder: SuperviewEncoder::Libx264,
        tools: ToolPaths {
            handbrake: write_tool(tool_dir, "HandBrakeCLI", FAKE_HANDBRAKE),
            superview: write_tool(tool_dir, "superview-cli", FAKE_SUPERVIEW),
        },
    }
}

fn make_input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "source video").unwrap();
    path
}

/// Temp dirs are created inside the output dir with a fixed prefix.
fn leftover_temp_dirs(output_dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("cropperview_"))
        })
        .collect()
}

#[test]
fn crop_and_superview_produce_suffixed_output() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.crop = Some("0:0:144:148".parse().unwrap());
    config.superview = true;

    let input = make_input(work.path(), "clip.mp4");
    let mut percents = Vec::new();

    let reports = process_videos(
        &config,
        &[input.clone()],
        &CancelToken::new(),
        &mut |_| {},
        &mut |p| percents.push(p),
    )
    .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].source, input);
    assert_eq!(reports[0].stages, vec![Stage::Crop, Stage::Superview]);
    assert_eq!(
        reports[0].output,
        output_dir.join("clip-cropped-superview.mp4")
    );
    assert!(reports[0].output.exists());

    assert_eq!(percents, vec![100.0]);
    assert!(leftover_temp_dirs(&output_dir).is_empty());
}

#[test]
fn combine_run_names_output_after_first_file() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.combine = true;
    config.crop = Some("0:0:10:10".parse().unwrap());
    config.superview = true;

    let files = vec![
        make_input(work.path(), "GX010001.mp4"),
        make_input(work.path(), "GX010002.mp4"),
        make_input(work.path(), "GX010003.mp4"),
    ];
    let mut percents = Vec::new();

    let reports = process_videos(
        &config,
        &files,
        &CancelToken::new(),
        &mut |_| {},
        &mut |p| percents.push(p),
    )
    .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].stages,
        vec![Stage::Combine, Stage::Crop, Stage::Superview]
    );
    assert_eq!(
        reports[0].output,
        output_dir.join("GX010001-combined-cropped-superview.mp4")
    );
    assert!(reports[0].output.exists());

    // One combine step plus one combined file.
    assert_eq!(percents, vec![50.0, 100.0]);
    assert!(leftover_temp_dirs(&output_dir).is_empty());
}

#[test]
fn combine_disabled_for_single_file() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.combine = true;
    config.superview = true;

    let input = make_input(work.path(), "solo.mp4");
    let reports = process_videos(
        &config,
        &[input],
        &CancelToken::new(),
        &mut |_| {},
        &mut |_| {},
    )
    .unwrap();

    // Combine requires more than one file; no -combined suffix.
    assert_eq!(reports[0].stages, vec![Stage::Superview]);
    assert_eq!(reports[0].output, output_dir.join("solo-superview.mp4"));
}

#[test]
fn missing_executable_fails_and_leaves_temp_dir() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.crop = Some("0:0:144:148".parse().unwrap());
    config.tools.handbrake = work.path().join("not_installed");

    let input = make_input(work.path(), "clip.mp4");
    let mut percents = Vec::new();

    let result = process_videos(
        &config,
        &[input],
        &CancelToken::new(),
        &mut |_| {},
        &mut |p| percents.push(p),
    );

    assert!(matches!(result, Err(CoreError::MissingExecutable(_))));
    assert!(!output_dir.join("clip-cropped.mp4").exists());
    assert!(percents.iter().all(|p| *p < 100.0));
    // Failed runs keep their intermediates for inspection.
    assert_eq!(leftover_temp_dirs(&output_dir).len(), 1);
}

#[test]
fn tool_failure_aborts_remaining_files() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.superview = true;
    config.tools.superview = write_tool(work.path(), "superview-broken", FAILING_TOOL);

    let files = vec![
        make_input(work.path(), "a.mp4"),
        make_input(work.path(), "b.mp4"),
    ];

    let result = process_videos(
        &config,
        &files,
        &CancelToken::new(),
        &mut |_| {},
        &mut |_| {},
    );

    match result {
        Err(CoreError::NonZeroExit { tool, code }) => {
            assert_eq!(tool, "superview-cli");
            assert_eq!(code, 2);
        }
        other => panic!("Unexpected result: {:?}", other),
    }
    assert!(!output_dir.join("a-superview.mp4").exists());
    assert!(!output_dir.join("b-superview.mp4").exists());
}

#[test]
fn tool_output_lines_reach_the_log_sink() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.crop = Some("1:2:3:4".parse().unwrap());

    let input = make_input(work.path(), "clip.mp4");
    let mut lines = Vec::new();

    process_videos(
        &config,
        &[input],
        &CancelToken::new(),
        &mut |line| lines.push(line.to_string()),
        &mut |_| {},
    )
    .unwrap();

    assert!(lines.iter().any(|l| l.contains("fake handbrake")));
    assert!(lines.iter().any(|l| l.contains("--crop 1:2:3:4")));
}

#[test]
fn no_stages_copies_original_into_output() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let config = make_config(work.path(), &output_dir);

    let input = make_input(work.path(), "clip.mp4");
    let reports = process_videos(
        &config,
        &[input.clone()],
        &CancelToken::new(),
        &mut |_| {},
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(reports[0].stages, Vec::<Stage>::new());
    assert_eq!(reports[0].output, output_dir.join("clip.mp4"));
    assert!(reports[0].output.exists());
    // The user's original stays put.
    assert!(input.exists());
}

#[test]
fn empty_file_set_is_rejected() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let config = make_config(work.path(), &output_dir);

    let result = process_videos(
        &config,
        &[],
        &CancelToken::new(),
        &mut |_| {},
        &mut |_| {},
    );
    assert!(matches!(result, Err(CoreError::NoFilesFound)));
}

#[test]
fn cancelled_token_stops_the_run() {
    let work = tempdir().unwrap();
    let output_dir = work.path().join("out");
    let mut config = make_config(work.path(), &output_dir);
    config.superview = true;

    let token = CancelToken::new();
    token.cancel();

    let input = make_input(work.path(), "clip.mp4");
    let result = process_videos(&config, &[input], &token, &mut |_| {}, &mut |_| {});
    assert!(matches!(result, Err(CoreError::Cancelled)));
    assert!(!output_dir.join("clip-superview.mp4").exists());
}
