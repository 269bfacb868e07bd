//! Store and settings persistence ports.

pub mod ports;
