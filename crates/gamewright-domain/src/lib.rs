//! Gamewright Domain Model
//!
//! Defines the data objects that flow through the game pipeline:
//! - ValidationOutcome: verdict of the static structure check
//! - ExecutionRecord: captured result of one sandboxed run
//! - SavedArtifact: paths written for one archived attempt
//!
//! Candidate failures (timeout, crash, non-zero exit) are represented as
//! data inside `ExecutionRecord`, not as errors — a misbehaving generated
//! program is an expected outcome of the pipeline. `EngineError` is reserved
//! for genuine environment problems (persistence, serialization).

pub mod error;
pub mod record;

pub use error::{EngineError, Result};
pub use record::{ExecutionRecord, SavedArtifact, ValidationOutcome};

/// Gamewright domain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
