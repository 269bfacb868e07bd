//! Customer record scoped to a store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer of a single store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub store_id: String,
    pub name: String,
    /// Phonetic reading of the name, used for ordering in the admin UI.
    pub kana: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(store_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            store_id: store_id.into(),
            name: name.into(),
            kana: None,
            phone: None,
            email: None,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }
}
