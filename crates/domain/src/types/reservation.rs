//! Reservation entity with an explicit status transition table.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reservation lifecycle states.
///
/// Closed enum instead of a free-form string column so that illegal states
/// are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl ReservationStatus {
    /// Transition table for reservation statuses.
    ///
    /// `Cancelled`, `Completed` and `NoShow` are terminal.
    pub fn can_transition_to(self, next: Self) -> bool {
        use ReservationStatus::{Cancelled, Completed, Confirmed, NoShow, Pending};
        matches!(
            (self, next),
            (Pending, Confirmed | Cancelled) | (Confirmed, Completed | Cancelled | NoShow)
        )
    }
}

/// A booked appointment at a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub store_id: String,
    pub customer_id: Uuid,
    pub stylist_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub menu: String,
    pub status: ReservationStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Apply a status transition, rejecting moves the table forbids.
    pub fn transition(&mut self, next: ReservationStatus) -> crate::errors::Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(crate::errors::ReservaError::Validation(format!(
                "cannot transition reservation from {:?} to {:?}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}
