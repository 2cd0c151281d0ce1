//! Error types for Viva.

use thiserror::Error;

/// Library-level error type for Viva operations.
#[derive(Error, Debug)]
pub enum VivaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("No questions available: {0}")]
    NoQuestionsAvailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Viva operations.
pub type Result<T> = std::result::Result<T, VivaError>;
