//! Common data types used throughout the application

pub mod calendar;
pub mod customer;
pub mod reservation;
pub mod setting;
pub mod store;
pub mod stylist;

pub use calendar::{AvailabilitySlot, OAuthReason};
pub use customer::Customer;
pub use reservation::{Reservation, ReservationStatus};
pub use setting::Setting;
pub use store::{CalendarSource, Store};
pub use stylist::Stylist;
