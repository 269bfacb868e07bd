//! Customer handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use reserva_domain::{Customer, ReservaError};
use serde::Deserialize;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::routes::authorize_store;

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;
    Ok(Json(ctx.customers.list_customers(&id).await?))
}

pub async fn get_one(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path((id, cid)): Path<(String, Uuid)>,
) -> Result<Json<Customer>, ApiError> {
    authorize_store(&ctx, &headers, &id).await?;
    Ok(Json(ctx.customers.get_customer(&id, cid).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub kana: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
}

pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    authorize_store(&ctx, &headers, &id).await?;

    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(ReservaError::Validation("customer name must not be empty".into()).into());
    }
    if let Some(email) = body.email.as_deref() {
        reserva_common::validation::validate_email(email)
            .map_err(|e| ReservaError::Validation(e.to_string()))?;
    }

    let mut customer = Customer::new(id, name);
    customer.kana = body.kana.filter(|k| !k.trim().is_empty());
    customer.phone = body.phone.filter(|p| !p.trim().is_empty());
    customer.email = body.email;
    customer.note = body.note;

    ctx.customers.insert_customer(customer.clone()).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}
