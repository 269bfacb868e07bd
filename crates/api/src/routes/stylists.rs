//! Stylist roster handlers.
//!
//! The roster is a per-store document saved wholesale, so PUT replaces
//! the full list rather than patching rows.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use reserva_domain::{ReservaError, Stylist};
use serde::Deserialize;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::routes::authorize_store;

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Stylist>>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;
    Ok(Json(ctx.stylists.list_stylists(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct StylistEntry {
    pub id: Option<Uuid>,
    pub name: String,
    pub active: bool,
    pub display_order: u32,
}

pub async fn replace(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Vec<StylistEntry>>,
) -> Result<Json<Vec<Stylist>>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let mut roster = Vec::with_capacity(body.len());
    for entry in body {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(ReservaError::Validation("stylist name must not be empty".into()).into());
        }
        roster.push(Stylist {
            // Rows without an id are new entries.
            id: entry.id.unwrap_or_else(Uuid::now_v7),
            store_id: id.clone(),
            name,
            active: entry.active,
            display_order: entry.display_order,
        });
    }
    roster.sort_by_key(|s| s.display_order);

    ctx.stylists.replace_stylists(&id, roster.clone()).await?;
    Ok(Json(roster))
}
