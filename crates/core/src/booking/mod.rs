//! Reservation, customer and stylist persistence ports.

pub mod ports;
