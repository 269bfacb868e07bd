//! Shared test helpers for `reserva-api` integration tests.
//!
//! In-memory repositories plus canned identity and OAuth doubles, wired
//! into a real `AppContext` so router tests exercise the full
//! handler/service stack without any I/O.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reserva_api::auth::OwnerAccessControl;
use reserva_api::AppContext;
use reserva_core::{
    CustomerRepository, Identity, IdentityProvider, OAuthClient, OAuthCredentials,
    RawCalendarEvent, ReservationFilter, ReservationRepository, SettingsRepository,
    StoreRepository, StylistRepository, TokenExchange, TokenSealer,
};
use reserva_domain::{
    Config, Customer, Environment, ReservaError, Reservation, Result, Setting, Store, Stylist,
};
use uuid::Uuid;

pub const OWNER_TOKEN: &str = "owner-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const OWNER_EMAIL: &str = "owner@example.com";
pub const ADMIN_EMAIL: &str = "root@example.com";

/// In-memory `StoreRepository`.
#[derive(Default)]
pub struct MemoryStores {
    rows: Mutex<HashMap<String, Store>>,
}

impl MemoryStores {
    pub fn insert(&self, store: Store) {
        self.rows.lock().insert(store.id.clone(), store);
    }

    pub fn snapshot(&self, id: &str) -> Option<Store> {
        self.rows.lock().get(id).cloned()
    }
}

#[async_trait]
impl StoreRepository for MemoryStores {
    async fn get_store(&self, id: &str) -> Result<Store> {
        self.rows
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| ReservaError::NotFound(format!("store {id}")))
    }

    async fn list_stores(&self) -> Result<Vec<Store>> {
        let mut stores: Vec<Store> = self.rows.lock().values().cloned().collect();
        stores.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stores)
    }

    async fn insert_store(&self, store: Store) -> Result<()> {
        self.rows.lock().insert(store.id.clone(), store);
        Ok(())
    }

    async fn update_store(&self, store: &Store) -> Result<()> {
        let mut guard = self.rows.lock();
        if !guard.contains_key(&store.id) {
            return Err(ReservaError::NotFound(format!("store {}", store.id)));
        }
        guard.insert(store.id.clone(), store.clone());
        Ok(())
    }
}

/// In-memory `ReservationRepository` with the contract's ordering.
#[derive(Default)]
pub struct MemoryReservations {
    rows: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationRepository for MemoryReservations {
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let mut matching: Vec<Reservation> =
            self.rows.lock().iter().filter(|r| filter.matches(r)).cloned().collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.start_time.cmp(&a.start_time)));
        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn get_reservation(&self, store_id: &str, id: Uuid) -> Result<Reservation> {
        self.rows
            .lock()
            .iter()
            .find(|r| r.store_id == store_id && r.id == id)
            .cloned()
            .ok_or_else(|| ReservaError::NotFound(format!("reservation {id}")))
    }

    async fn insert_reservation(&self, reservation: Reservation) -> Result<()> {
        self.rows.lock().push(reservation);
        Ok(())
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<()> {
        let mut guard = self.rows.lock();
        match guard
            .iter_mut()
            .find(|r| r.store_id == reservation.store_id && r.id == reservation.id)
        {
            Some(row) => {
                *row = reservation.clone();
                Ok(())
            }
            None => Err(ReservaError::NotFound(format!("reservation {}", reservation.id))),
        }
    }
}

/// In-memory `CustomerRepository`.
#[derive(Default)]
pub struct MemoryCustomers {
    rows: Mutex<Vec<Customer>>,
}

impl MemoryCustomers {
    pub fn insert(&self, customer: Customer) {
        self.rows.lock().push(customer);
    }
}

#[async_trait]
impl CustomerRepository for MemoryCustomers {
    async fn list_customers(&self, store_id: &str) -> Result<Vec<Customer>> {
        let mut matching: Vec<Customer> =
            self.rows.lock().iter().filter(|c| c.store_id == store_id).cloned().collect();
        matching.sort_by(|a, b| a.kana.cmp(&b.kana).then_with(|| a.name.cmp(&b.name)));
        Ok(matching)
    }

    async fn get_customer(&self, store_id: &str, id: Uuid) -> Result<Customer> {
        self.rows
            .lock()
            .iter()
            .find(|c| c.store_id == store_id && c.id == id)
            .cloned()
            .ok_or_else(|| ReservaError::NotFound(format!("customer {id}")))
    }

    async fn insert_customer(&self, customer: Customer) -> Result<()> {
        self.rows.lock().push(customer);
        Ok(())
    }
}

/// In-memory `StylistRepository`.
#[derive(Default)]
pub struct MemoryStylists {
    rows: Mutex<HashMap<String, Vec<Stylist>>>,
}

#[async_trait]
impl StylistRepository for MemoryStylists {
    async fn list_stylists(&self, store_id: &str) -> Result<Vec<Stylist>> {
        let mut roster = self.rows.lock().get(store_id).cloned().unwrap_or_default();
        roster.sort_by_key(|s| s.display_order);
        Ok(roster)
    }

    async fn replace_stylists(&self, store_id: &str, stylists: Vec<Stylist>) -> Result<()> {
        self.rows.lock().insert(store_id.to_string(), stylists);
        Ok(())
    }
}

/// In-memory `SettingsRepository`.
#[derive(Default)]
pub struct MemorySettings {
    rows: Mutex<HashMap<(String, String), Setting>>,
}

impl MemorySettings {
    pub fn seed_oauth_client(&self) {
        for (key, value) in [
            ("google_oauth_client_id", "client-1"),
            ("google_oauth_client_secret", "secret-1"),
        ] {
            self.rows.lock().insert(
                ("_admin".to_string(), key.to_string()),
                Setting {
                    store_id: "_admin".to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                    updated_at: Utc::now(),
                },
            );
        }
    }
}

#[async_trait]
impl SettingsRepository for MemorySettings {
    async fn get_setting(&self, scope: &str, key: &str) -> Result<Option<Setting>> {
        Ok(self.rows.lock().get(&(scope.to_string(), key.to_string())).cloned())
    }

    async fn put_setting(&self, setting: Setting) -> Result<()> {
        self.rows.lock().insert((setting.store_id.clone(), setting.key.clone()), setting);
        Ok(())
    }
}

/// Maps fixed bearer tokens to identities; everything else is rejected.
pub struct TokenTableIdentity;

#[async_trait]
impl IdentityProvider for TokenTableIdentity {
    async fn authenticate(&self, token: &str) -> Result<Identity> {
        match token {
            OWNER_TOKEN => Ok(Identity {
                user_id: "user-owner".to_string(),
                email: OWNER_EMAIL.to_string(),
            }),
            ADMIN_TOKEN => Ok(Identity {
                user_id: "user-admin".to_string(),
                email: ADMIN_EMAIL.to_string(),
            }),
            _ => Err(ReservaError::Auth("unknown session token".to_string())),
        }
    }
}

/// Canned OAuth provider double.
pub struct FakeOAuthClient {
    pub exchange_refresh_token: Option<String>,
    pub events: Vec<RawCalendarEvent>,
}

impl Default for FakeOAuthClient {
    fn default() -> Self {
        Self { exchange_refresh_token: Some("refresh-token-1".to_string()), events: Vec::new() }
    }
}

#[async_trait]
impl OAuthClient for FakeOAuthClient {
    fn consent_url(&self, client_id: &str, state: &str) -> Result<String> {
        Ok(format!(
            "https://accounts.google.com/o/oauth2/v2/auth?client_id={client_id}&state={state}"
        ))
    }

    async fn exchange_code(&self, _creds: &OAuthCredentials, _code: &str) -> Result<TokenExchange> {
        Ok(TokenExchange {
            access_token: "access-token-1".to_string(),
            refresh_token: self.exchange_refresh_token.clone(),
            expires_in: 3600,
        })
    }

    async fn refresh_access_token(
        &self,
        _creds: &OAuthCredentials,
        _refresh_token: &str,
    ) -> Result<String> {
        Ok("access-token-2".to_string())
    }

    async fn primary_calendar_id(&self, _access_token: &str) -> Result<String> {
        Ok("owner-calendar@example.com".to_string())
    }

    async fn list_events(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<RawCalendarEvent>> {
        Ok(self.events.clone())
    }
}

/// Reversible sealer with a visible prefix.
pub struct PrefixSealer;

impl TokenSealer for PrefixSealer {
    fn seal(&self, plaintext: &str) -> Result<String> {
        Ok(format!("sealed:{plaintext}"))
    }

    fn open(&self, envelope: &str) -> Result<String> {
        envelope
            .strip_prefix("sealed:")
            .map(str::to_string)
            .ok_or_else(|| ReservaError::Internal("not a sealed envelope".to_string()))
    }
}

/// Fully wired test application over in-memory state.
pub struct Harness {
    pub ctx: Arc<AppContext>,
    pub stores: Arc<MemoryStores>,
    pub reservations: Arc<MemoryReservations>,
    pub customers: Arc<MemoryCustomers>,
    pub settings: Arc<MemorySettings>,
}

/// Wire a context with the given environment and one seeded store
/// (`abc123`, owned by [`OWNER_EMAIL`]). Access control is the real
/// owner-match implementation with [`ADMIN_EMAIL`] as global admin.
pub fn harness(environment: Environment) -> Harness {
    let stores = Arc::new(MemoryStores::default());
    stores.insert(Store::new("abc123", "Sakura Hair", OWNER_EMAIL));

    let reservations = Arc::new(MemoryReservations::default());
    let customers = Arc::new(MemoryCustomers::default());
    let stylists = Arc::new(MemoryStylists::default());
    let settings = Arc::new(MemorySettings::default());
    settings.seed_oauth_client();

    let access = Arc::new(OwnerAccessControl::from_admin_list(
        stores.clone() as Arc<dyn StoreRepository>,
        ADMIN_EMAIL,
    ));

    let config = Config { environment, ..Config::default() };

    let ctx = Arc::new(AppContext::assemble(
        config,
        environment,
        stores.clone(),
        reservations.clone(),
        customers.clone(),
        stylists,
        settings.clone(),
        Arc::new(TokenTableIdentity),
        access,
        Arc::new(FakeOAuthClient::default()),
        Arc::new(PrefixSealer),
    ));

    Harness { ctx, stores, reservations, customers, settings }
}
