//! Gamewright Engine - validation and sandboxed execution of generated games
//!
//! Provides the pipeline that turns raw model output into an archived run:
//! - Extracts the candidate program from free-form response text
//! - Statically checks it declares `class Game` with a `play` method
//! - Runs it as an isolated, time-bounded subprocess
//! - Archives the source and its execution record
//!
//! The candidate is untrusted, model-authored code. It is never loaded into
//! this process: it is materialized to a scoped temp file and executed as a
//! separate OS process with a minimized environment and a wall-clock
//! deadline.

pub mod config;
pub mod executor;
pub mod extract;
pub mod generate;
pub mod persist;
pub mod pipeline;
pub mod validate;

// Re-export key types
pub use config::{EngineConfig, ExecutorConfig};
pub use executor::GameExecutor;
pub use extract::extract_code;
pub use generate::TextGenerator;
pub use persist::GameStore;
pub use pipeline::{DesignOutcome, GamePipeline, PipelineReport};
pub use validate::validate_structure;
