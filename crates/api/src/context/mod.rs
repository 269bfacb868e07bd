//! Application context - dependency injection container
//!
//! The environment is branched on exactly once, here: backend selection,
//! identity provider, and token sealing are all decided at construction
//! and injected as trait objects everywhere else.

use std::sync::Arc;

use reserva_common::TokenCipher;
use reserva_core::{
    AccessControl, AvailabilityService, CalendarLinkService, CustomerRepository, IdentityProvider,
    OAuthClient, ReservationRepository, SettingsRepository, StoreRepository, StylistRepository,
    TokenSealer,
};
use reserva_domain::{Config, Environment, ReservaError, Result};
use reserva_infra::{GoogleOAuthClient, HttpClient, JsonBackend, RestBackend};

use crate::auth::{DevIdentityProvider, OwnerAccessControl, RestIdentityProvider};

/// Type alias for store repository trait object
pub type DynStoreRepository = dyn StoreRepository + 'static;

/// Type alias for reservation repository trait object
pub type DynReservationRepository = dyn ReservationRepository + 'static;

/// Type alias for customer repository trait object
pub type DynCustomerRepository = dyn CustomerRepository + 'static;

/// Type alias for stylist repository trait object
pub type DynStylistRepository = dyn StylistRepository + 'static;

/// Type alias for settings repository trait object
pub type DynSettingsRepository = dyn SettingsRepository + 'static;

/// Type alias for identity provider trait object
pub type DynIdentityProvider = dyn IdentityProvider + 'static;

/// Type alias for access control trait object
pub type DynAccessControl = dyn AccessControl + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub environment: Environment,

    pub stores: Arc<DynStoreRepository>,
    pub reservations: Arc<DynReservationRepository>,
    pub customers: Arc<DynCustomerRepository>,
    pub stylists: Arc<DynStylistRepository>,
    pub settings: Arc<DynSettingsRepository>,

    pub identity: Arc<DynIdentityProvider>,
    pub access: Arc<DynAccessControl>,

    pub linker: Arc<CalendarLinkService>,
    pub availability: Arc<AvailabilityService>,
}

impl AppContext {
    /// Wire the full context from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let environment = config.environment;
        let http = HttpClient::new()?;

        let (stores, reservations, customers, stylists, settings): (
            Arc<DynStoreRepository>,
            Arc<DynReservationRepository>,
            Arc<DynCustomerRepository>,
            Arc<DynStylistRepository>,
            Arc<DynSettingsRepository>,
        ) = if environment.is_local() {
            let backend = JsonBackend::new(config.storage.data_dir.clone());
            (
                backend.stores,
                backend.reservations,
                backend.customers,
                backend.stylists,
                backend.settings,
            )
        } else {
            let base_url = config.storage.rest_base_url.clone().ok_or_else(|| {
                ReservaError::Config("hosted backend requires a REST base URL".into())
            })?;
            let service_role_key = config.storage.service_role_key.clone().ok_or_else(|| {
                ReservaError::Config("hosted backend requires a service role key".into())
            })?;
            let backend = RestBackend::new(http.clone(), base_url, service_role_key);
            (
                backend.stores,
                backend.reservations,
                backend.customers,
                backend.stylists,
                backend.settings,
            )
        };

        let identity: Arc<DynIdentityProvider> = if environment.is_local() {
            Arc::new(DevIdentityProvider)
        } else {
            let auth_base_url = std::env::var("RESERVA_AUTH_BASE_URL").map_err(|_| {
                ReservaError::Config(
                    "RESERVA_AUTH_BASE_URL is required outside the local environment".into(),
                )
            })?;
            Arc::new(RestIdentityProvider::new(http.clone(), auth_base_url))
        };

        let admin_list = std::env::var("RESERVA_GLOBAL_ADMINS").unwrap_or_default();
        let access: Arc<DynAccessControl> =
            Arc::new(OwnerAccessControl::from_admin_list(Arc::clone(&stores), &admin_list));

        let sealer: Arc<dyn TokenSealer> = Arc::new(build_cipher(&config, environment)?);
        let oauth: Arc<dyn OAuthClient> =
            Arc::new(GoogleOAuthClient::new(http, config.oauth.redirect_uri.clone()));

        Ok(Self::assemble(
            config,
            environment,
            stores,
            reservations,
            customers,
            stylists,
            settings,
            identity,
            access,
            oauth,
            sealer,
        ))
    }

    /// Assemble a context from ready-made parts. Test suites inject mocks
    /// through this path.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        config: Config,
        environment: Environment,
        stores: Arc<DynStoreRepository>,
        reservations: Arc<DynReservationRepository>,
        customers: Arc<DynCustomerRepository>,
        stylists: Arc<DynStylistRepository>,
        settings: Arc<DynSettingsRepository>,
        identity: Arc<DynIdentityProvider>,
        access: Arc<DynAccessControl>,
        oauth: Arc<dyn OAuthClient>,
        sealer: Arc<dyn TokenSealer>,
    ) -> Self {
        let linker = Arc::new(CalendarLinkService::new(
            Arc::clone(&stores),
            Arc::clone(&settings),
            Arc::clone(&access),
            Arc::clone(&oauth),
            Arc::clone(&sealer),
            environment,
        ));
        let availability = Arc::new(AvailabilityService::new(
            Arc::clone(&stores),
            Arc::clone(&settings),
            oauth,
            sealer,
        ));

        Self {
            config,
            environment,
            stores,
            reservations,
            customers,
            stylists,
            settings,
            identity,
            access,
            linker,
            availability,
        }
    }
}

/// Sealing key policy: configured key everywhere, ephemeral key as a local
/// convenience. Hosted environments have already validated the key exists.
fn build_cipher(config: &Config, environment: Environment) -> Result<TokenCipher> {
    let cipher = match config.oauth.token_cipher_key.as_deref() {
        Some(key) => TokenCipher::from_base64_key(key)
            .map_err(|e| ReservaError::Config(format!("invalid token cipher key: {e}")))?,
        None if environment.is_local() => {
            tracing::warn!("no token cipher key configured, sealed tokens will not survive restart");
            TokenCipher::new(TokenCipher::generate_key())
                .map_err(|e| ReservaError::Config(format!("generated key rejected: {e}")))?
        }
        None => {
            return Err(ReservaError::Config(
                "a token cipher key is required outside the local environment".into(),
            ))
        }
    };
    tracing::info!(key = %cipher.key_fingerprint(), "token cipher ready");
    Ok(cipher)
}
