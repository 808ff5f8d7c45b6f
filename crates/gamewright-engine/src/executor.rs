//! Sandboxed execution of candidate programs.
//!
//! The candidate is staged to a scoped temp file and run as a child process
//! with a minimized environment, no stdin, and a hard wall-clock deadline.
//! Every outcome — clean exit, crash, timeout, spawn failure — comes back as
//! an [`ExecutionRecord`]; a failing candidate is an expected result, not an
//! engine fault, so nothing propagates past this boundary.

use crate::config::ExecutorConfig;
use gamewright_domain::ExecutionRecord;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs candidate programs in isolated, time-bounded subprocesses.
pub struct GameExecutor {
    config: ExecutorConfig,
}

impl GameExecutor {
    /// Create an executor with the given configuration.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Execute `source` with the deadline from the configuration.
    ///
    /// The temp source file lives exactly as long as this call: its guard is
    /// dropped (and the file deleted) on every return path. The deadline is
    /// wall-clock, measured from spawn; when it expires the child is killed
    /// and reaped before the timeout record is returned.
    pub async fn execute(&self, source: &str) -> ExecutionRecord {
        let start = Instant::now();
        let timeout = Duration::from_secs(self.config.timeout_secs);

        // Stage the candidate. The NamedTempFile guard deletes it on drop.
        let scratch_dir = self
            .config
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let script = match tempfile::Builder::new()
            .prefix("game_")
            .suffix(".py")
            .tempfile_in(&scratch_dir)
        {
            Ok(file) => file,
            Err(e) => return ExecutionRecord::failed(e, start.elapsed()),
        };
        if let Err(e) = std::fs::write(script.path(), source) {
            return ExecutionRecord::failed(e, start.elapsed());
        }

        debug!(script = %script.path().display(), "Staged candidate source");

        // Minimized environment: only what locates the interpreter, plus an
        // empty PYTHONPATH so the candidate cannot import host packages.
        let mut command = Command::new(&self.config.python_bin);
        command
            .arg(script.path())
            .env_clear()
            .env("PATH", std::env::var_os("PATH").unwrap_or_default())
            .env("PYTHONPATH", "")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so a timeout kill reaches anything the
        // candidate itself spawned.
        #[cfg(unix)]
        command.process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return ExecutionRecord::failed(e, start.elapsed()),
        };

        // Drain both pipes concurrently so a chatty candidate cannot fill a
        // pipe buffer and deadlock against our wait.
        let stdout_task = tokio::spawn(drain(child.stdout.take()));
        let stderr_task = tokio::spawn(drain(child.stderr.take()));

        let status = match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                terminate_process_tree(&mut child).await;
                return ExecutionRecord::failed(e, start.elapsed());
            }
            Err(_) => {
                // Deadline expired: terminate the whole tree and reap the
                // child before returning.
                terminate_process_tree(&mut child).await;
                debug!(timeout_secs = self.config.timeout_secs, "Candidate timed out");
                return ExecutionRecord::timed_out(timeout, start.elapsed());
            }
        };

        let stdout = String::from_utf8_lossy(&stdout_task.await.unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_task.await.unwrap_or_default()).into_owned();
        let exit_code = status.code().unwrap_or(-1);

        ExecutionRecord::completed(exit_code, stdout, stderr, start.elapsed())
    }
}

/// Kill the candidate and everything it spawned, then reap the child.
///
/// The child leads its own process group, so signalling the negative pgid
/// reaches grandchildren the candidate forked; a plain `kill` on the direct
/// child would leave them running.
async fn terminate_process_tree(child: &mut tokio::process::Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        unsafe {
            libc::kill(-(pid as i32), libc::SIGKILL);
        }
    }
    if let Err(e) = child.kill().await {
        warn!(error = %e, "Failed to kill candidate process");
    }
}

async fn drain<R>(pipe: Option<R>) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}
