//! Calendar Availability Reader.
//!
//! Given a store, fetches the linked calendar's events for a date range
//! and maps them into normalized [`AvailabilitySlot`] records. A store
//! without a configured calendar yields an empty list — "no calendar yet"
//! is deliberately distinct from "calendar lookup failed".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reserva_domain::{AvailabilitySlot, CalendarSource, ReservaError, Result};
use tracing::{debug, instrument};

use crate::calendar::credentials::resolve_oauth_credentials;
use crate::calendar::ports::{OAuthClient, TokenSealer};
use crate::stores::ports::{SettingsRepository, StoreRepository};

/// Reads busy/available windows from the external calendar.
pub struct AvailabilityService {
    stores: Arc<dyn StoreRepository>,
    settings: Arc<dyn SettingsRepository>,
    oauth: Arc<dyn OAuthClient>,
    sealer: Arc<dyn TokenSealer>,
}

impl AvailabilityService {
    pub fn new(
        stores: Arc<dyn StoreRepository>,
        settings: Arc<dyn SettingsRepository>,
        oauth: Arc<dyn OAuthClient>,
        sealer: Arc<dyn TokenSealer>,
    ) -> Self {
        Self { stores, settings, oauth, sealer }
    }

    /// Fetch availability slots for `[start, end]`.
    ///
    /// `NotFound` when the store does not exist; `Ok(vec![])` when it has
    /// no calendar configured.
    #[instrument(skip(self), fields(store_id))]
    pub async fn get_availability(
        &self,
        store_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AvailabilitySlot>> {
        if end < start {
            return Err(ReservaError::Validation("end must not precede start".to_string()));
        }

        let store = self.stores.get_store(store_id).await?;

        if !store.has_calendar() {
            debug!(store_id, "store has no calendar configured");
            return Ok(Vec::new());
        }

        if store.calendar_source != CalendarSource::StoreOauth {
            // System-managed calendars are read through the service-account
            // integration, which this deployment does not carry.
            return Err(ReservaError::NotAvailable(
                "system-managed calendar availability is not supported".to_string(),
            ));
        }

        let sealed = store.calendar_refresh_token.as_deref().ok_or_else(|| {
            ReservaError::Internal(format!("store {store_id} is linked but holds no refresh token"))
        })?;
        let refresh_token = self.sealer.open(sealed)?;

        let creds = resolve_oauth_credentials(self.settings.as_ref()).await?;
        let access_token = self.oauth.refresh_access_token(&creds, &refresh_token).await?;

        let events =
            self.oauth.list_events(&access_token, &store.calendar_id, start, end).await?;

        let mut slots: Vec<AvailabilitySlot> = events
            .into_iter()
            .map(|event| {
                AvailabilitySlot::from_event(
                    event.title.unwrap_or_default(),
                    event.start,
                    event.end,
                    event.location,
                    event.description,
                )
            })
            .collect();
        slots.sort_by_key(|slot| slot.start_time);

        debug!(store_id, count = slots.len(), "availability computed");
        Ok(slots)
    }
}
