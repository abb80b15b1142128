//! Error types for Quill Core

use thiserror::Error;

/// Result type alias using QuillError
pub type Result<T> = std::result::Result<T, QuillError>;

/// Top-level error type for all Quill operations
#[derive(Debug, Error)]
pub enum QuillError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("A generation for chapter index {0} is already running")]
    GenerationInFlight(usize),

    #[error("A generated text for chapter {0} is still staged; commit or discard it first")]
    StagingOccupied(u32),
}

/// Errors that occur while reading user-supplied or persisted values
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Unknown chapter status: {0}")]
    UnknownStatus(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid format value: {0}")]
    InvalidFormat(String),

    #[error("Malformed content: {0}")]
    MalformedContent(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}
