//! Error types for the common crate.

use thiserror::Error;

/// Errors raised by common utilities.
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for common operations.
pub type CommonResult<T> = std::result::Result<T, CommonError>;
