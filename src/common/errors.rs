//! Error types for the trader

use thiserror::Error;

/// Result type alias using our TraderError
pub type Result<T> = std::result::Result<T, TraderError>;

/// Main error type for configuration, harness and encoding failures
///
/// Strategy evaluation itself never fails: missing market data is carried
/// as `Option` values and produces no orders instead of an error.
#[derive(Error, Debug)]
pub enum TraderError {
    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A product parameter set failed validation
    #[error("Invalid parameters for {product}: {reason}")]
    InvalidParameters { product: String, reason: String },

    /// Malformed harness input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<config::ConfigError> for TraderError {
    fn from(err: config::ConfigError) -> Self {
        TraderError::Configuration(err.to_string())
    }
}
