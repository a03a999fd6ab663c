//! Error types for ubica.

use thiserror::Error;

/// Result type for ubica operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ubica operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Gazetteer could not be loaded or is structurally invalid.
    ///
    /// Raised at detector construction only; detection calls never fail,
    /// they return the default `"unknown"` place instead.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error while reading a gazetteer or test-set file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed gazetteer JSON document.
    #[error("Gazetteer parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed gazetteer or evaluation CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
