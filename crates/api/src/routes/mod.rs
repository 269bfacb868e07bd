//! Route table and shared request helpers.

mod calendar;
mod customers;
mod health;
mod reservations;
mod settings;
mod stores;
mod stylists;

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::{get, patch, post};
use axum::Router;
use reserva_common::validation::validate_store_id;
use reserva_core::Identity;
use reserva_domain::{ReservaError, Result};

use crate::context::AppContext;

/// Build the full route table.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/stores", get(stores::list_stores))
        .route("/api/stores/{id}", get(stores::get_store).patch(stores::update_store))
        .route("/api/stores/{id}/google-calendar/connect", get(calendar::connect))
        .route("/api/google-calendar/callback", get(calendar::callback))
        .route("/api/stores/{id}/google-calendar/disconnect", post(calendar::disconnect))
        .route("/api/stores/{id}/availability", get(calendar::availability))
        .route(
            "/api/stores/{id}/reservations",
            get(reservations::list).post(reservations::create),
        )
        .route("/api/stores/{id}/reservations/{rid}", patch(reservations::update))
        .route("/api/stores/{id}/customers", get(customers::list).post(customers::create))
        .route("/api/stores/{id}/customers/{cid}", get(customers::get_one))
        .route("/api/stores/{id}/stylists", get(stylists::list).put(stylists::replace))
        .route(
            "/api/stores/{id}/settings/{key}",
            get(settings::get_one).put(settings::put_one),
        )
        .with_state(ctx)
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authenticate the request. `Auth` error when no usable token is present.
async fn authenticate(ctx: &AppContext, headers: &HeaderMap) -> Result<Identity> {
    let token =
        bearer_token(headers).ok_or_else(|| ReservaError::Auth("missing bearer token".into()))?;
    ctx.identity.authenticate(token).await
}

/// Authenticate, validate the store id, and check admin access to the
/// store. Malformed ids never reach the repositories.
async fn authorize_store(ctx: &AppContext, headers: &HeaderMap, store_id: &str) -> Result<Identity> {
    let identity = authenticate(ctx, headers).await?;
    validate_store_id(store_id).map_err(|e| ReservaError::Validation(e.to_string()))?;
    let allowed = ctx.access.has_access(&identity.user_id, store_id, &identity.email).await?;
    if !allowed {
        return Err(ReservaError::Forbidden(format!("no admin access to store {store_id}")));
    }
    Ok(identity)
}
