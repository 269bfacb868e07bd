//! Caller identity and access-control ports.

pub mod ports;
