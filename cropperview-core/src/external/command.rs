//! Shared external process invoker.
//!
//! Launches an executable, forwards its combined stdout/stderr line by line
//! into a log sink as the lines arrive, and maps non-zero exit codes to a
//! failure. There is deliberately no timeout, retry, or kill logic: the
//! caller blocks for the full duration of the external tool.

use crate::error::{CoreError, CoreResult};

use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

/// Sink for external tool output lines, one call per line.
pub type LogSink<'a> = dyn FnMut(&str) + 'a;

/// Runs an external tool to completion, streaming its output.
///
/// Verifies the executable exists before spawning and fails with
/// [`CoreError::MissingExecutable`] otherwise. Stdout and stderr are both
/// captured and forwarded to `log` at line granularity, interleaved in
/// arrival order. A non-zero exit status fails with
/// [`CoreError::NonZeroExit`]; exit by signal is reported as code -1.
pub fn run_tool(
    tool_name: &str,
    tool_path: &Path,
    args: &[OsString],
    working_dir: &Path,
    log: &mut LogSink<'_>,
) -> CoreResult<()> {
    if !tool_path.exists() {
        return Err(CoreError::MissingExecutable(tool_path.to_path_buf()));
    }

    log::debug!(
        "Running {}: {} {:?} (cwd: {})",
        tool_name,
        tool_path.display(),
        args,
        working_dir.display()
    );

    let mut child = Command::new(tool_path)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CoreError::CommandStart {
            tool: tool_name.to_string(),
            source: e,
        })?;

    // Both pipes feed one channel so the sink sees lines in arrival order.
    let (tx, rx) = mpsc::channel::<String>();
    let stdout_handle = child.stdout.take().map(|out| spawn_reader(out, tx.clone()));
    let stderr_handle = child.stderr.take().map(|err| spawn_reader(err, tx));

    for line in rx {
        log(&line);
    }

    if let Some(handle) = stdout_handle {
        let _ = handle.join();
    }
    if let Some(handle) = stderr_handle {
        let _ = handle.join();
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        let code = status.code().unwrap_or(-1);
        log::error!("{} failed with exit code {}", tool_name, code);
        Err(CoreError::NonZeroExit {
            tool: tool_name.to_string(),
            code,
        })
    }
}

fn spawn_reader<R: Read + Send + 'static>(
    source: R,
    tx: mpsc::Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(source).lines() {
            match line {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    })
}
