//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use reserva_domain::ReservaError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ReservaError);

impl From<InfraError> for ReservaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ReservaError> for InfraError {
    fn from(value: ReservaError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoReservaError {
    fn into_reserva(self) -> ReservaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ReservaError */
/* -------------------------------------------------------------------------- */

impl IntoReservaError for HttpError {
    fn into_reserva(self) -> ReservaError {
        if self.is_timeout() {
            return ReservaError::Timeout("outbound http call exceeded its deadline".into());
        }
        if self.is_connect() {
            return ReservaError::Upstream("connection to upstream service failed".into());
        }
        if self.is_decode() {
            return ReservaError::Upstream("upstream response body could not be decoded".into());
        }
        ReservaError::Upstream(format!("http request failed: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_reserva())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ReservaError */
/* -------------------------------------------------------------------------- */

impl IntoReservaError for std::io::Error {
    fn into_reserva(self) -> ReservaError {
        match self.kind() {
            std::io::ErrorKind::NotFound => {
                ReservaError::NotFound("file or directory not found".into())
            }
            std::io::ErrorKind::PermissionDenied => {
                ReservaError::Storage("permission denied accessing data directory".into())
            }
            _ => ReservaError::Storage(format!("filesystem operation failed: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_reserva())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ReservaError */
/* -------------------------------------------------------------------------- */

impl IntoReservaError for serde_json::Error {
    fn into_reserva(self) -> ReservaError {
        ReservaError::Storage(format!("collection document is not valid json: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_reserva())
    }
}
