//! Error types used throughout the application
//!
//! Every boundary-facing failure is converted into one of these variants
//! before it crosses the HTTP boundary; raw upstream exception text never
//! reaches a caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Reserva
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum ReservaError {
    /// Missing or malformed input (4xx).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid credential (401).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Authenticated but not permitted for this tenant (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource absent on a single-record lookup (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// External provider call failed; message is a reason code (502).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Required credentials or settings absent (500).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Outbound call exceeded its deadline (408).
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Persistence backend failure (500).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Operation disabled in the current environment (501).
    #[error("Not available in this environment: {0}")]
    NotAvailable(String),

    /// Anything else; detail is logged server-side only (500).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Reserva operations
pub type Result<T> = std::result::Result<T, ReservaError>;
