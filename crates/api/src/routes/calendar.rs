//! Calendar linking and availability handlers.
//!
//! Connect and callback are browser redirect flows: every outcome,
//! success or failure, is encoded in the redirect URL back to the admin
//! UI. Raw provider errors never reach the browser.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Json;
use chrono::DateTime;
use reserva_core::{CallbackParams, LinkError};
use reserva_domain::{AvailabilitySlot, ReservaError};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::routes::{authenticate, authorize_store};

fn admin_base(ctx: &AppContext) -> String {
    let mut base = ctx.config.oauth.admin_base_url.clone();
    while base.ends_with('/') {
        base.pop();
    }
    base
}

/// Redirect target for a failed linker step:
/// `<admin>[/<store>]?google_calendar=error&message=<code>`.
fn failure_redirect(ctx: &AppContext, error: &LinkError) -> Redirect {
    let base = admin_base(ctx);
    let url = match &error.store_id {
        Some(store_id) => {
            format!("{base}/{store_id}?google_calendar=error&message={}", error.reason)
        }
        None => format!("{base}?google_calendar=error&message={}", error.reason),
    };
    Redirect::temporary(&url)
}

pub async fn connect(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Redirect {
    // Authentication failures become redirect reason codes, not 401 bodies.
    let identity = authenticate(&ctx, &headers).await.ok();

    match ctx.linker.initiate(Some(&id), identity.as_ref()).await {
        Ok(consent_url) => Redirect::temporary(&consent_url),
        Err(error) => failure_redirect(&ctx, &error),
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let params =
        CallbackParams { code: query.code, state: query.state, error: query.error };

    match ctx.linker.complete(params).await {
        Ok(store_id) => {
            let url = format!("{}/{store_id}?google_calendar=connected", admin_base(&ctx));
            Redirect::temporary(&url)
        }
        Err(error) => failure_redirect(&ctx, &error),
    }
}

pub async fn disconnect(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let identity = authenticate(&ctx, &headers).await.ok();
    ctx.linker.disconnect(&id, identity.as_ref()).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn availability(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<AvailabilitySlot>>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let start = parse_instant(query.start.as_deref(), "start")?;
    let end = parse_instant(query.end.as_deref(), "end")?;

    let slots = ctx.availability.get_availability(&id, start, end).await?;
    Ok(Json(slots))
}

fn parse_instant(
    value: Option<&str>,
    name: &str,
) -> Result<chrono::DateTime<chrono::Utc>, ApiError> {
    let raw = value
        .ok_or_else(|| ReservaError::Validation(format!("missing query parameter: {name}")))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| ReservaError::Validation(format!("{name} is not a valid RFC3339 time")).into())
}
