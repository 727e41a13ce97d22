use thiserror::Error;

/// Error type that captures common store and service failures.
///
/// Missing documents are never an error: reads surface `Option::None`
/// instead, so `NotFound` has no variant here.
#[derive(Debug, Error)]
pub enum PapayaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
