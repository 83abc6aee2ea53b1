//! Error types for Synheart Gaze

use crate::types::Operation;
use thiserror::Error;

/// Errors raised by classifier operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("Empty input: {0} received no samples")]
    EmptyInput(Operation),
}

impl ClassifyError {
    /// The operation that failed
    pub fn operation(&self) -> Operation {
        match self {
            ClassifyError::EmptyInput(operation) => *operation,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::EmptyInput(_) => "empty_input",
        }
    }
}

/// Errors that can occur while loading, saving or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter value: {0}")]
    InvalidParameter(String),
}

/// Umbrella error for report encoding and the C ABI
#[derive(Debug, Error)]
pub enum GazeError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
