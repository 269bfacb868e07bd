//! OAuth Calendar Linker.
//!
//! Orchestrates the three-step dance that associates a store with the
//! owner's external calendar: authorization redirect, provider callback
//! with code exchange, and disconnect. State machine:
//!
//! ```text
//! unlinked -> authorizing -> linked
//!    ^                          |
//!    +------ disconnect --------+
//! ```
//!
//! Every failure on the redirect paths is reported to the admin UI only as
//! an [`OAuthReason`] code; full detail goes to the server log.

use std::sync::Arc;

use reserva_domain::{Environment, OAuthReason, OAuthState, ReservaError, Result};
use tracing::{error, info, warn};

use crate::auth::ports::{AccessControl, Identity};
use crate::calendar::credentials::resolve_oauth_credentials;
use crate::calendar::ports::{OAuthClient, TokenSealer};
use crate::stores::ports::{SettingsRepository, StoreRepository};

/// Failure on a redirect-bound linker path.
///
/// Carries the reason code for the redirect URL and, when safely known,
/// the store the admin should be returned to. A malformed state token
/// never populates `store_id` — that path must not reveal the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkError {
    pub reason: OAuthReason,
    pub store_id: Option<String>,
}

impl LinkError {
    fn new(reason: OAuthReason) -> Self {
        Self { reason, store_id: None }
    }

    fn for_store(reason: OAuthReason, store_id: &str) -> Self {
        Self { reason, store_id: Some(store_id.to_string()) }
    }
}

/// Query parameters delivered by the provider's callback redirect.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Orchestrates calendar linking for stores.
pub struct CalendarLinkService {
    stores: Arc<dyn StoreRepository>,
    settings: Arc<dyn SettingsRepository>,
    access: Arc<dyn AccessControl>,
    oauth: Arc<dyn OAuthClient>,
    sealer: Arc<dyn TokenSealer>,
    environment: Environment,
}

impl CalendarLinkService {
    pub fn new(
        stores: Arc<dyn StoreRepository>,
        settings: Arc<dyn SettingsRepository>,
        access: Arc<dyn AccessControl>,
        oauth: Arc<dyn OAuthClient>,
        sealer: Arc<dyn TokenSealer>,
        environment: Environment,
    ) -> Self {
        Self { stores, settings, access, oauth, sealer, environment }
    }

    /// Begin the flow: validate the caller and store, then produce the
    /// provider consent URL (`unlinked -> authorizing`).
    pub async fn initiate(
        &self,
        store_id: Option<&str>,
        caller: Option<&Identity>,
    ) -> std::result::Result<String, LinkError> {
        let store_id = match store_id {
            Some(id) if !id.trim().is_empty() => id.trim(),
            _ => {
                warn!("calendar link initiation without store id");
                return Err(LinkError::new(OAuthReason::Server));
            }
        };

        if self.environment.is_local() {
            return Err(LinkError::for_store(OAuthReason::Local, store_id));
        }

        let Some(caller) = caller else {
            return Err(LinkError::for_store(OAuthReason::Unauthorized, store_id));
        };

        if let Err(e) = self.stores.get_store(store_id).await {
            warn!(store_id, error = %e, "calendar link initiation for unknown store");
            return Err(LinkError::for_store(OAuthReason::Server, store_id));
        }

        match self.access.has_access(&caller.user_id, store_id, &caller.email).await {
            Ok(true) => {}
            Ok(false) => return Err(LinkError::for_store(OAuthReason::Forbidden, store_id)),
            Err(e) => {
                error!(store_id, error = %e, "access check failed");
                return Err(LinkError::for_store(OAuthReason::Server, store_id));
            }
        }

        let creds = match resolve_oauth_credentials(self.settings.as_ref()).await {
            Ok(creds) => creds,
            Err(ReservaError::Config(msg)) => {
                warn!(store_id, %msg, "oauth credentials not configured");
                return Err(LinkError::for_store(OAuthReason::Config, store_id));
            }
            Err(e) => {
                error!(store_id, error = %e, "credential resolution failed");
                return Err(LinkError::for_store(OAuthReason::Server, store_id));
            }
        };

        let state = OAuthState::new(store_id)
            .encode()
            .map_err(|_| LinkError::for_store(OAuthReason::Server, store_id))?;

        let url = self
            .oauth
            .consent_url(&creds.client_id, &state)
            .map_err(|_| LinkError::for_store(OAuthReason::Server, store_id))?;

        info!(store_id, "calendar link initiated");
        Ok(url)
    }

    /// Complete the flow from the provider callback
    /// (`authorizing -> linked`). Returns the linked store id.
    pub async fn complete(
        &self,
        params: CallbackParams,
    ) -> std::result::Result<String, LinkError> {
        let state = match params.state.as_deref() {
            Some(token) => match OAuthState::decode(token) {
                Ok(state) => state,
                Err(_) => {
                    warn!("callback with undecodable state token");
                    return Err(LinkError::new(OAuthReason::InvalidState));
                }
            },
            None => return Err(LinkError::new(OAuthReason::InvalidState)),
        };

        // State must decode to a known store. An unknown id gets the same
        // opaque answer as a malformed token.
        let mut store = match self.stores.get_store(&state.store_id).await {
            Ok(store) => store,
            Err(_) => {
                warn!("callback state referenced unknown store");
                return Err(LinkError::new(OAuthReason::InvalidState));
            }
        };

        if let Some(provider_error) = params.error.as_deref() {
            warn!(store_id = %store.id, provider_error, "provider reported authorization error");
        }

        let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
            return Err(LinkError::for_store(OAuthReason::NoCode, &store.id));
        };

        let creds = match resolve_oauth_credentials(self.settings.as_ref()).await {
            Ok(creds) => creds,
            Err(e) => {
                warn!(store_id = %store.id, error = %e, "credentials unavailable at callback");
                return Err(LinkError::for_store(OAuthReason::Config, &store.id));
            }
        };

        let exchange = match self.oauth.exchange_code(&creds, code).await {
            Ok(exchange) => exchange,
            Err(e) => {
                error!(store_id = %store.id, error = %e, "token exchange failed");
                return Err(LinkError::for_store(OAuthReason::Exchange, &store.id));
            }
        };

        // Initiate always forces re-consent precisely so this is present;
        // without it the linkage would silently die at first refresh.
        let Some(refresh_token) = exchange.refresh_token.as_deref() else {
            warn!(store_id = %store.id, "provider returned no refresh token");
            return Err(LinkError::for_store(OAuthReason::NoRefreshToken, &store.id));
        };

        let calendar_id = match self.oauth.primary_calendar_id(&exchange.access_token).await {
            Ok(id) => id,
            Err(e) => {
                // Non-fatal: fall back to the provider's alias for the
                // account's primary calendar.
                warn!(store_id = %store.id, error = %e, "primary calendar lookup failed, using fallback");
                reserva_domain::constants::PRIMARY_CALENDAR_ID.to_string()
            }
        };

        let sealed = match self.sealer.seal(refresh_token) {
            Ok(sealed) => sealed,
            Err(e) => {
                error!(store_id = %store.id, error = %e, "refresh token encryption failed");
                return Err(LinkError::for_store(OAuthReason::Encryption, &store.id));
            }
        };

        store.link_calendar(calendar_id, sealed);
        if let Err(e) = self.stores.update_store(&store).await {
            error!(store_id = %store.id, error = %e, "failed to persist calendar linkage");
            return Err(LinkError::for_store(OAuthReason::Save, &store.id));
        }

        info!(store_id = %store.id, "calendar linked");
        Ok(store.id)
    }

    /// Sever the linkage (`linked -> unlinked`): reset the source to
    /// system, clear the calendar id and destroy the sealed refresh token.
    pub async fn disconnect(&self, store_id: &str, caller: Option<&Identity>) -> Result<()> {
        if self.environment.is_local() {
            return Err(ReservaError::NotAvailable(
                "calendar disconnect is not implemented in the local environment".to_string(),
            ));
        }

        let caller = caller
            .ok_or_else(|| ReservaError::Auth("authentication required".to_string()))?;

        let mut store = self.stores.get_store(store_id).await?;

        if !self.access.has_access(&caller.user_id, store_id, &caller.email).await? {
            return Err(ReservaError::Forbidden(format!(
                "not an administrator of store {store_id}"
            )));
        }

        store.unlink_calendar();
        self.stores.update_store(&store).await?;

        info!(store_id, "calendar disconnected");
        Ok(())
    }
}
