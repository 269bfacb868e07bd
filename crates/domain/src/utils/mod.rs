//! Pure domain utilities.

pub mod state_token;
