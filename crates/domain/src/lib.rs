//! # Reserva Domain
//!
//! Business domain types and models for the Reserva booking backend.
//!
//! This crate contains:
//! - Domain data types (Store, Reservation, Customer, ...)
//! - Domain error types and Result definitions
//! - Configuration structures and the environment resolver
//! - OAuth state-token codec and calendar title rules
//!
//! ## Architecture
//! - No dependencies on other Reserva crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export the state-token codec
pub use utils::state_token::OAuthState;
