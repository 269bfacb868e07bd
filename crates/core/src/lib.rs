//! # Reserva Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for persistence and collaborators
//! - The OAuth Calendar Linker state machine
//! - The Calendar Availability Reader
//!
//! ## Architecture Principles
//! - Only depends on `reserva-common` and `reserva-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod booking;
pub mod calendar;
pub mod stores;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{AccessControl, Identity, IdentityProvider};
pub use booking::ports::{
    CustomerRepository, ReservationFilter, ReservationRepository, StylistRepository,
};
pub use calendar::availability::AvailabilityService;
pub use calendar::credentials::resolve_oauth_credentials;
pub use calendar::linker::{CalendarLinkService, CallbackParams, LinkError};
pub use calendar::ports::{
    OAuthClient, OAuthCredentials, RawCalendarEvent, TokenExchange, TokenSealer,
};
pub use stores::ports::{SettingsRepository, StoreRepository};
