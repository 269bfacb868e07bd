//! Port interfaces for booking persistence
//!
//! Filter semantics are part of the contract and must match between
//! backends: store-id equality, inclusive date range, status equality,
//! ordering by date then start time descending, optional limit.

use async_trait::async_trait;
use chrono::NaiveDate;
use reserva_domain::{Customer, Reservation, ReservationStatus, Result, Stylist};
use uuid::Uuid;

/// Query filter for reservation listings.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub store_id: String,
    /// Inclusive lower bound: `date_from <= date`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound: `date <= date_to`.
    pub date_to: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub limit: Option<usize>,
}

impl ReservationFilter {
    pub fn for_store(store_id: impl Into<String>) -> Self {
        Self { store_id: store_id.into(), ..Self::default() }
    }

    /// True when the reservation matches every set predicate.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        reservation.store_id == self.store_id
            && self.date_from.map_or(true, |from| from <= reservation.date)
            && self.date_to.map_or(true, |to| reservation.date <= to)
            && self.status.map_or(true, |status| reservation.status == status)
    }
}

/// Trait for persisting reservations.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// List reservations matching the filter, ordered by date descending
    /// then start time descending. Empty when nothing matches.
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>>;

    /// Fetch one reservation scoped to a store. `NotFound` when absent.
    async fn get_reservation(&self, store_id: &str, id: Uuid) -> Result<Reservation>;

    /// Insert a new reservation.
    async fn insert_reservation(&self, reservation: Reservation) -> Result<()>;

    /// Persist an updated reservation. `NotFound` when absent.
    async fn update_reservation(&self, reservation: &Reservation) -> Result<()>;
}

/// Trait for persisting customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// List a store's customers ordered by kana, then name.
    async fn list_customers(&self, store_id: &str) -> Result<Vec<Customer>>;

    /// Fetch one customer scoped to a store. `NotFound` when absent.
    async fn get_customer(&self, store_id: &str, id: Uuid) -> Result<Customer>;

    /// Insert a new customer.
    async fn insert_customer(&self, customer: Customer) -> Result<()>;
}

/// Trait for the per-store stylist roster.
///
/// The roster is a single document replaced wholesale, matching the admin
/// UI's save model.
#[async_trait]
pub trait StylistRepository: Send + Sync {
    /// List a store's stylists ordered by display order.
    async fn list_stylists(&self, store_id: &str) -> Result<Vec<Stylist>>;

    /// Replace the store's entire roster.
    async fn replace_stylists(&self, store_id: &str, stylists: Vec<Stylist>) -> Result<()>;
}
