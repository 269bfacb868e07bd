//! # Reserva Common
//!
//! Shared utilities with no dependency on other Reserva crates.
//!
//! This crate contains:
//! - Cryptographic primitives (AES-256-GCM token cipher)
//! - Input validation helpers (store ids, emails, date ranges)
//! - Common error types

pub mod crypto;
pub mod error;
pub mod validation;

pub use crypto::{SealedToken, TokenCipher};
pub use error::{CommonError, CommonResult};
