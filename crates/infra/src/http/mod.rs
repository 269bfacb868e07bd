//! Outbound HTTP plumbing.

mod client;

pub use client::{HttpClient, HttpClientBuilder};
