//! Error types for the product feedback analyzer

use thiserror::Error;

/// User-safe message stored and displayed when an analysis fails for any
/// provider-side reason. The underlying cause is logged, never shown.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze product. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Gemini API error: {0}")]
    GeminiError(String),

    /// Opaque analysis failure. The payload is the displayable message.
    #[error("{0}")]
    Analysis(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The single failure every provider/parse problem collapses into.
    pub fn analysis_failed() -> Self {
        Error::Analysis(ANALYSIS_FAILED_MESSAGE.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
