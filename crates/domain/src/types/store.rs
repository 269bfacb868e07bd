//! Store (tenant) aggregate and its calendar linkage sub-resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the store's calendar identifier comes from.
///
/// `StoreOauth` means the owner linked their own Google account; only then
/// is a refresh token held for the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarSource {
    #[default]
    System,
    StoreOauth,
}

/// A tenant (salon/business) in the multi-tenant system.
///
/// The calendar fields form a sub-resource with their own mutation path
/// (connect/callback/disconnect); they are never edited through the plain
/// store-update surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// 6-char lowercase alphanumeric identifier, unique across tenants.
    pub id: String,
    pub name: String,
    pub owner_email: String,
    /// External calendar identifier; empty string means "no calendar yet".
    #[serde(default)]
    pub calendar_id: String,
    #[serde(default)]
    pub calendar_source: CalendarSource,
    /// Sealed (encrypted) refresh token; present only for `StoreOauth`.
    #[serde(default)]
    pub calendar_refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Create a store with no calendar linkage.
    pub fn new(id: impl Into<String>, name: impl Into<String>, owner_email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            owner_email: owner_email.into(),
            calendar_id: String::new(),
            calendar_source: CalendarSource::System,
            calendar_refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a completed OAuth linkage.
    pub fn link_calendar(&mut self, calendar_id: impl Into<String>, sealed_token: impl Into<String>) {
        self.calendar_source = CalendarSource::StoreOauth;
        self.calendar_id = calendar_id.into();
        self.calendar_refresh_token = Some(sealed_token.into());
        self.updated_at = Utc::now();
    }

    /// Revert to the unlinked state. Complete inverse of [`Store::link_calendar`].
    pub fn unlink_calendar(&mut self) {
        self.calendar_source = CalendarSource::System;
        self.calendar_id = String::new();
        self.calendar_refresh_token = None;
        self.updated_at = Utc::now();
    }

    /// True when a calendar identifier is configured.
    pub fn has_calendar(&self) -> bool {
        !self.calendar_id.is_empty()
    }
}
