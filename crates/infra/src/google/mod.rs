//! Google OAuth2 and Calendar integration.

mod client;

pub use client::GoogleOAuthClient;
