//! Error types for engine operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Generation error: {0}")]
    Generation(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
