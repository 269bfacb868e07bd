//! Reservation handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use reserva_core::ReservationFilter;
use reserva_domain::{ReservaError, Reservation, ReservationStatus};
use serde::Deserialize;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::routes::authorize_store;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub limit: Option<usize>,
}

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let filter = ReservationFilter {
        store_id: id,
        date_from: query.date_from,
        date_to: query.date_to,
        status: query.status,
        limit: query.limit,
    };
    Ok(Json(ctx.reservations.list_reservations(&filter).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_id: Uuid,
    pub stylist_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub menu: String,
    pub note: Option<String>,
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let menu = body.menu.trim().to_string();
    if menu.is_empty() {
        return Err(ReservaError::Validation("menu must not be empty".into()).into());
    }
    if body.end_time <= body.start_time {
        return Err(ReservaError::Validation("end_time must be after start_time".into()).into());
    }

    // The customer must belong to the same store.
    ctx.customers.get_customer(&id, body.customer_id).await?;

    let now = Utc::now();
    let reservation = Reservation {
        id: Uuid::now_v7(),
        store_id: id,
        customer_id: body.customer_id,
        stylist_id: body.stylist_id,
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
        menu,
        status: ReservationStatus::Pending,
        note: body.note,
        created_at: now,
        updated_at: now,
    };

    ctx.reservations.insert_reservation(reservation.clone()).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateReservationRequest {
    pub status: Option<ReservationStatus>,
    pub note: Option<String>,
}

pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path((id, rid)): Path<(String, Uuid)>,
    Json(body): Json<UpdateReservationRequest>,
) -> Result<Json<Reservation>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let mut reservation = ctx.reservations.get_reservation(&id, rid).await?;
    if let Some(next) = body.status {
        reservation.transition(next)?;
    }
    if let Some(note) = body.note {
        reservation.note = if note.trim().is_empty() { None } else { Some(note) };
        reservation.updated_at = Utc::now();
    }

    ctx.reservations.update_reservation(&reservation).await?;
    Ok(Json(reservation))
}
