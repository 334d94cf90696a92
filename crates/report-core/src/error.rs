//! Error types for report assembly

use thiserror::Error;

/// Report assembly specific errors
///
/// Only the top-level payload can make assembly fail. Malformed fields and
/// unknown enum values inside a payload fall back to display strings and are
/// reported through [`crate::observer::AssemblyObserver`] instead.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The analysis result payload is absent or empty
    #[error("No analysis result available")]
    MissingPayload,

    /// The payload could not be decoded into an analysis result
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rendering a report to text failed
    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

impl From<minijinja::Error> for ReportError {
    fn from(err: minijinja::Error) -> Self {
        ReportError::RenderError(err.to_string())
    }
}
