//! # Reserva Infra
//!
//! Infrastructure adapters behind the `reserva-core` ports:
//! - JSON-file persistence backend (local development)
//! - Hosted REST persistence backend (staging/production)
//! - Google OAuth2 + Calendar client
//! - Retrying HTTP client with bounded timeout
//! - Configuration loader

pub mod config;
pub mod errors;
pub mod google;
pub mod http;
pub mod persistence;

pub use errors::InfraError;
pub use google::GoogleOAuthClient;
pub use http::HttpClient;
pub use persistence::json::JsonBackend;
pub use persistence::rest::RestBackend;
