//! Persistence adapters.
//!
//! Two backends with an identical external contract: JSON documents on the
//! local filesystem for development, and a hosted PostgREST-style store for
//! staging and production.

pub mod json;
pub mod rest;
