//! OAuth state-token codec.
//!
//! The state parameter round-tripped through the provider redirect is
//! base64url(JSON `{"store_id": ...}`), no padding. The format is part of
//! the external contract and must round-trip exactly.
//!
//! Known gap carried over from the original system: the token has no
//! expiry and no CSRF binding to the initiating session.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{ReservaError, Result};

/// Request context recovered from the provider's redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    pub store_id: String,
}

impl OAuthState {
    pub fn new(store_id: impl Into<String>) -> Self {
        Self { store_id: store_id.into() }
    }

    /// Encode as an opaque `state` query parameter.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| ReservaError::Internal(format!("failed to encode oauth state: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a `state` parameter received from the provider.
    ///
    /// A malformed token yields a generic validation error that does not
    /// echo the token or reveal which store was targeted.
    pub fn decode(token: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| ReservaError::Validation("invalid oauth state".to_string()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| ReservaError::Validation("invalid oauth state".to_string()))
    }
}
