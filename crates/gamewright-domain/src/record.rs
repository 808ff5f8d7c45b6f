//! Pipeline data objects: validation outcomes, execution records, artifacts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Verdict of the static structure check on a candidate program.
///
/// `reason` is a human-readable diagnostic: `"valid"` on success, otherwise
/// the specific defect (missing type, missing method, syntax error).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the candidate satisfies the structural contract.
    pub is_valid: bool,

    /// Human-readable diagnostic.
    pub reason: String,
}

impl ValidationOutcome {
    /// Candidate satisfies the contract.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: "valid".to_string(),
        }
    }

    /// Candidate declined with the given diagnostic.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

/// Captured result of one sandboxed execution attempt.
///
/// Exactly one of: normal exit (`success` iff exit code 0), non-zero exit,
/// timeout/signal termination (`exit_code == -1`, synthetic stderr), or
/// spawn failure (same sentinel path). Serialized to
/// `execution_results.json` with the archive's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Whether the candidate ran to completion with exit code 0.
    pub success: bool,

    /// Complete captured standard output (no truncation).
    pub stdout: String,

    /// Complete captured standard error, or a synthetic timeout/spawn
    /// failure message.
    pub stderr: String,

    /// Real exit status, or -1 for timeout, signal death, or spawn failure.
    #[serde(rename = "returncode")]
    pub exit_code: i32,

    /// Wall-clock time for the whole execution call, including teardown.
    #[serde(rename = "execution_time", with = "duration_secs")]
    pub duration: Duration,
}

impl ExecutionRecord {
    /// Child process exited on its own within the deadline.
    pub fn completed(exit_code: i32, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            success: exit_code == 0,
            stdout,
            stderr,
            exit_code,
            duration,
        }
    }

    /// Wall-clock deadline expired and the child was terminated.
    pub fn timed_out(timeout: Duration, duration: Duration) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: format!("Execution timeout after {} seconds", timeout.as_secs()),
            exit_code: -1,
            duration,
        }
    }

    /// The child could not be spawned or its source could not be staged.
    pub fn failed(message: impl std::fmt::Display, duration: Duration) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: format!("Execution error: {message}"),
            exit_code: -1,
            duration,
        }
    }

    /// Whether the run passed (clean exit with code 0).
    pub fn passed(&self) -> bool {
        self.success && self.exit_code == 0
    }
}

/// Paths written for one archived game attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedArtifact {
    /// The numbered, timestamped attempt directory.
    pub directory: PathBuf,

    /// Source file inside the directory (`game.py`).
    pub source_path: PathBuf,

    /// Execution record inside the directory (`execution_results.json`).
    pub results_path: PathBuf,
}

/// Serde adapter: `Duration` as fractional seconds on disk.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
