// ============================================================================
// cropperview-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Helper Functions for Logging
//
// Diagnostics use the standard `log` crate with `env_logger` as the
// backend (RUST_LOG, default "info"). Each processing run additionally
// writes every pipeline and external-tool line to its own log file, named
// with a timestamp.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Initializes env_logger with an `info` default filter.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS",
/// used to name run log files.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Per-run log file capturing pipeline status and external tool output.
pub struct RunLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// Creates `cropperview_run_<timestamp>.log` inside `log_dir`.
    pub fn create(log_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(log_dir)?;
        let path = log_dir.join(format!("cropperview_run_{}.log", get_timestamp()));
        let writer = BufWriter::new(File::create(&path)?);
        Ok(RunLog { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line; write failures are swallowed so logging can never
    /// take down a run.
    pub fn write_line(&mut self, line: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        writeln!(self.writer, "[{}] {}", timestamp, line).ok();
    }

    pub fn flush(&mut self) {
        self.writer.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_log_writes_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut run_log = RunLog::create(dir.path()).unwrap();
        run_log.write_line("first");
        run_log.write_line("second");
        run_log.flush();

        let contents = std::fs::read_to_string(run_log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
        assert!(lines[0].starts_with('['));
    }
}
