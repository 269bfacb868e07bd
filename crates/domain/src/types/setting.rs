//! Admin-scoped key/value settings row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SETTINGS_ALLOW_LIST;
use crate::errors::{ReservaError, Result};

/// A single key/value settings entry for a store.
///
/// Values hold secrets (OAuth client id/secret, service-account JSON), so
/// the write surface is restricted to [`SETTINGS_ALLOW_LIST`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub store_id: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Setting {
    /// Reject writes to keys outside the allow-list.
    pub fn validate_key(key: &str) -> Result<()> {
        if SETTINGS_ALLOW_LIST.contains(&key) {
            Ok(())
        } else {
            Err(ReservaError::Validation(format!("settings key not allowed: {key}")))
        }
    }
}
