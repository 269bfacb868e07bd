//! Calendar integration: linker state machine and availability reader.

pub mod availability;
pub mod credentials;
pub mod linker;
pub mod ports;
