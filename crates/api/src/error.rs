//! Domain error → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reserva_domain::ReservaError;
use serde_json::json;
use tracing::{error, warn};

/// Wrapper so route handlers can return `Result<_, ApiError>` with `?`.
#[derive(Debug)]
pub struct ApiError(pub ReservaError);

impl From<ReservaError> for ApiError {
    fn from(value: ReservaError) -> Self {
        ApiError(value)
    }
}

fn status_for(error: &ReservaError) -> StatusCode {
    match error {
        ReservaError::Validation(_) => StatusCode::BAD_REQUEST,
        ReservaError::Auth(_) => StatusCode::UNAUTHORIZED,
        ReservaError::Forbidden(_) => StatusCode::FORBIDDEN,
        ReservaError::NotFound(_) => StatusCode::NOT_FOUND,
        ReservaError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        ReservaError::Upstream(_) => StatusCode::BAD_GATEWAY,
        ReservaError::NotAvailable(_) => StatusCode::NOT_IMPLEMENTED,
        ReservaError::Config(_) | ReservaError::Storage(_) | ReservaError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        // Internal detail stays in the logs; the body carries the variant
        // name and its already-sanitised message.
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "request rejected");
        }

        let body = json!({ "error": self.0 });
        (status, Json(body)).into_response()
    }
}
