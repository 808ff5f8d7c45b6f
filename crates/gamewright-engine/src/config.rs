//! Engine configuration.

use std::path::PathBuf;

/// Configuration for the sandboxed executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Interpreter used to run candidate programs.
    pub python_bin: PathBuf,

    /// Wall-clock deadline in seconds, measured from spawn.
    pub timeout_secs: u64,

    /// Directory for staged candidate source files.
    /// Defaults to the system temp directory when unset.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            python_bin: PathBuf::from("python3"),
            timeout_secs: 30,
            scratch_dir: None,
        }
    }
}

impl ExecutorConfig {
    /// Override the execution deadline.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Configuration for the whole pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Executor settings.
    pub executor: ExecutorConfig,

    /// Root directory where game attempts are archived.
    pub output_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executor: ExecutorConfig::default(),
            output_dir: PathBuf::from("data/self_generated_games"),
        }
    }
}
