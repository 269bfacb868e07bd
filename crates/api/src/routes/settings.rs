//! Per-scope settings handlers. Writes are limited to the key allow-list.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use reserva_domain::{ReservaError, Setting};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::routes::authorize_store;

pub async fn get_one(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path((id, key)): Path<(String, String)>,
) -> Result<Json<Setting>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;
    Setting::validate_key(&key)?;

    let setting = ctx
        .settings
        .get_setting(&id, &key)
        .await?
        .ok_or_else(|| ReservaError::NotFound(format!("setting {key} is not set")))?;
    Ok(Json(setting))
}

#[derive(Debug, Deserialize)]
pub struct PutSettingRequest {
    pub value: String,
}

pub async fn put_one(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path((id, key)): Path<(String, String)>,
    Json(body): Json<PutSettingRequest>,
) -> Result<Json<Setting>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;
    Setting::validate_key(&key)?;

    if body.value.trim().is_empty() {
        return Err(ReservaError::Validation("setting value must not be empty".into()).into());
    }

    let setting = Setting { store_id: id, key, value: body.value, updated_at: Utc::now() };
    ctx.settings.put_setting(setting.clone()).await?;
    Ok(Json(setting))
}
