//! Error types for the cliffwalk crate

use thiserror::Error;

/// Main error type for the cliffwalk crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("state {state} is out of range (environment has {num_states} states)")]
    StateOutOfRange { state: usize, num_states: usize },

    #[error("action {action} is out of range (environment has {num_actions} actions)")]
    ActionOutOfRange { action: usize, num_actions: usize },

    #[error("environment returned non-finite reward {reward}")]
    InvalidReward { reward: f64 },

    #[error("Q-table shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("{space} space must contain at least one element")]
    EmptySpace { space: String },

    #[error("Q-table is corrupted: {message}")]
    CorruptTable { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
