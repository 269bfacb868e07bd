//! File-backed reservation repository.

use std::path::PathBuf;

use async_trait::async_trait;
use reserva_core::{ReservationFilter, ReservationRepository};
use reserva_domain::{Reservation, ReservaError, Result};
use tracing::instrument;
use uuid::Uuid;

use super::collection::JsonCollection;

pub struct JsonReservationRepository {
    collection: JsonCollection<Reservation>,
}

impl JsonReservationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { collection: JsonCollection::new(path) }
    }
}

#[async_trait]
impl ReservationRepository for JsonReservationRepository {
    #[instrument(skip(self, filter), fields(store_id = %filter.store_id))]
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let mut matching: Vec<Reservation> = self
            .collection
            .read()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        // Date descending, then start time descending.
        matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.start_time.cmp(&a.start_time)));
        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    #[instrument(skip(self))]
    async fn get_reservation(&self, store_id: &str, id: Uuid) -> Result<Reservation> {
        self.collection
            .read()
            .await?
            .into_iter()
            .find(|r| r.store_id == store_id && r.id == id)
            .ok_or_else(|| ReservaError::NotFound(format!("reservation {id}")))
    }

    #[instrument(skip(self, reservation), fields(store_id = %reservation.store_id))]
    async fn insert_reservation(&self, reservation: Reservation) -> Result<()> {
        self.collection
            .update(|reservations| {
                reservations.push(reservation);
                Ok(())
            })
            .await
    }

    #[instrument(skip(self, reservation), fields(store_id = %reservation.store_id))]
    async fn update_reservation(&self, reservation: &Reservation) -> Result<()> {
        self.collection
            .update(|reservations| {
                let slot = reservations
                    .iter_mut()
                    .find(|r| r.store_id == reservation.store_id && r.id == reservation.id)
                    .ok_or_else(|| {
                        ReservaError::NotFound(format!("reservation {}", reservation.id))
                    })?;
                *slot = reservation.clone();
                Ok(())
            })
            .await
    }
}
