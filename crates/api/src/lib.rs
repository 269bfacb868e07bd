//! # Reserva API
//!
//! HTTP surface for the booking backend: route handlers, request
//! extraction, error mapping, and the `AppContext` dependency wiring.

pub mod auth;
pub mod context;
pub mod error;
pub mod routes;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::build_router;
