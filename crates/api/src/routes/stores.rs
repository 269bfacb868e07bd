//! Store resource handlers.
//!
//! The calendar fields are a sub-resource with their own mutation path;
//! the plain update surface here touches only name and owner email.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use reserva_domain::{ReservaError, Store};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::routes::{authenticate, authorize_store};

#[derive(Debug, serde::Deserialize)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
    pub owner_email: Option<String>,
}

pub async fn get_store(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Store>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;
    let store = ctx.stores.get_store(&id).await?;
    Ok(Json(store))
}

pub async fn list_stores(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Store>>, ApiError> {
    let identity = authenticate(&ctx, &headers).await?;
    if !ctx.access.is_global_admin(&identity.email).await? {
        return Err(ReservaError::Forbidden("store listing is admin-only".into()).into());
    }
    Ok(Json(ctx.stores.list_stores().await?))
}

pub async fn update_store(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateStoreRequest>,
) -> Result<Json<Store>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let mut store = ctx.stores.get_store(&id).await?;
    if let Some(name) = body.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ReservaError::Validation("store name must not be empty".into()).into());
        }
        store.name = name;
    }
    if let Some(email) = body.owner_email {
        reserva_common::validation::validate_email(&email)
            .map_err(|e| ReservaError::Validation(e.to_string()))?;
        store.owner_email = email;
    }
    store.updated_at = chrono::Utc::now();

    ctx.stores.update_store(&store).await?;
    Ok(Json(store))
}
