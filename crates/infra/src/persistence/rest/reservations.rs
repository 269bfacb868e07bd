//! Hosted reservation repository.
//!
//! Filter semantics must match the file backend exactly; see the port
//! documentation in `reserva-core`.

use std::sync::Arc;

use async_trait::async_trait;
use reserva_core::{ReservationFilter, ReservationRepository};
use reserva_domain::{Reservation, ReservaError, Result};
use tracing::instrument;
use uuid::Uuid;

use super::client::RestClient;

const TABLE: &str = "reservations";

pub struct RestReservationRepository {
    client: Arc<RestClient>,
}

impl RestReservationRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

fn filter_query(filter: &ReservationFilter) -> Result<Vec<(&'static str, String)>> {
    let mut query = vec![("store_id", format!("eq.{}", filter.store_id))];
    if let Some(from) = filter.date_from {
        query.push(("date", format!("gte.{from}")));
    }
    if let Some(to) = filter.date_to {
        query.push(("date", format!("lte.{to}")));
    }
    if let Some(status) = filter.status {
        let status = serde_json::to_value(status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| ReservaError::Internal("unserializable status filter".into()))?;
        query.push(("status", format!("eq.{status}")));
    }
    query.push(("order", "date.desc,start_time.desc".to_string()));
    if let Some(limit) = filter.limit {
        query.push(("limit", limit.to_string()));
    }
    Ok(query)
}

#[async_trait]
impl ReservationRepository for RestReservationRepository {
    #[instrument(skip(self, filter), fields(store_id = %filter.store_id))]
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let query = filter_query(filter)?;
        self.client.select(TABLE, &query).await
    }

    #[instrument(skip(self))]
    async fn get_reservation(&self, store_id: &str, id: Uuid) -> Result<Reservation> {
        let query = [
            ("id", format!("eq.{id}")),
            ("store_id", format!("eq.{store_id}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<Reservation> = self.client.select(TABLE, &query).await?;
        rows.into_iter().next().ok_or_else(|| ReservaError::NotFound(format!("reservation {id}")))
    }

    #[instrument(skip(self, reservation), fields(store_id = %reservation.store_id))]
    async fn insert_reservation(&self, reservation: Reservation) -> Result<()> {
        self.client.insert(TABLE, std::slice::from_ref(&reservation)).await
    }

    #[instrument(skip(self, reservation), fields(store_id = %reservation.store_id))]
    async fn update_reservation(&self, reservation: &Reservation) -> Result<()> {
        let query = [
            ("id", format!("eq.{}", reservation.id)),
            ("store_id", format!("eq.{}", reservation.store_id)),
        ];
        let matched = self.client.update(TABLE, &query, reservation).await?;
        if matched == 0 {
            return Err(ReservaError::NotFound(format!("reservation {}", reservation.id)));
        }
        Ok(())
    }
}
