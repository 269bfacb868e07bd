//! Shared test helpers for `reserva-core` integration tests.
//!
//! In-memory mocks for the persistence and collaborator ports so linker
//! and availability tests can focus on behaviour instead of boilerplate.

// Not every mock is used by every test binary.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use reserva_core::auth::ports::{AccessControl, Identity};
use reserva_core::calendar::ports::{
    OAuthClient, OAuthCredentials, RawCalendarEvent, TokenExchange, TokenSealer,
};
use reserva_core::stores::ports::{SettingsRepository, StoreRepository};
use reserva_domain::{ReservaError, Result, Setting, Store};

/// Caller identity used across tests.
pub fn admin_identity() -> Identity {
    Identity { user_id: "user-1".to_string(), email: "admin@example.com".to_string() }
}

/// In-memory mock for `StoreRepository`.
#[derive(Default)]
pub struct MockStoreRepository {
    stores: Mutex<HashMap<String, Store>>,
    fail_updates: bool,
}

impl MockStoreRepository {
    pub fn with_store(store: Store) -> Self {
        let repo = Self::default();
        repo.stores.lock().insert(store.id.clone(), store);
        repo
    }

    /// Variant whose update operation always fails, for save-error paths.
    pub fn failing_updates(store: Store) -> Self {
        let mut repo = Self::with_store(store);
        repo.fail_updates = true;
        repo
    }

    pub fn snapshot(&self, id: &str) -> Option<Store> {
        self.stores.lock().get(id).cloned()
    }
}

#[async_trait]
impl StoreRepository for MockStoreRepository {
    async fn get_store(&self, id: &str) -> Result<Store> {
        self.stores
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| ReservaError::NotFound(format!("store {id}")))
    }

    async fn list_stores(&self) -> Result<Vec<Store>> {
        Ok(self.stores.lock().values().cloned().collect())
    }

    async fn insert_store(&self, store: Store) -> Result<()> {
        self.stores.lock().insert(store.id.clone(), store);
        Ok(())
    }

    async fn update_store(&self, store: &Store) -> Result<()> {
        if self.fail_updates {
            return Err(ReservaError::Storage("update rejected by test double".to_string()));
        }
        let mut guard = self.stores.lock();
        if !guard.contains_key(&store.id) {
            return Err(ReservaError::NotFound(format!("store {}", store.id)));
        }
        guard.insert(store.id.clone(), store.clone());
        Ok(())
    }
}

/// In-memory mock for `SettingsRepository`.
#[derive(Default)]
pub struct MockSettingsRepository {
    rows: Mutex<HashMap<(String, String), Setting>>,
}

impl MockSettingsRepository {
    pub fn with_row(self, scope: &str, key: &str, value: &str) -> Self {
        self.rows.lock().insert(
            (scope.to_string(), key.to_string()),
            Setting {
                store_id: scope.to_string(),
                key: key.to_string(),
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        self
    }

    /// Seed the admin-scope OAuth client pair.
    pub fn with_oauth_client(self) -> Self {
        self.with_row("_admin", "google_oauth_client_id", "client-from-settings")
            .with_row("_admin", "google_oauth_client_secret", "secret-from-settings")
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepository {
    async fn get_setting(&self, scope: &str, key: &str) -> Result<Option<Setting>> {
        Ok(self.rows.lock().get(&(scope.to_string(), key.to_string())).cloned())
    }

    async fn put_setting(&self, setting: Setting) -> Result<()> {
        self.rows.lock().insert((setting.store_id.clone(), setting.key.clone()), setting);
        Ok(())
    }
}

/// Access-control stub with a fixed answer.
pub struct StaticAccessControl {
    allowed: bool,
}

impl StaticAccessControl {
    pub fn allowing() -> Self {
        Self { allowed: true }
    }

    pub fn denying() -> Self {
        Self { allowed: false }
    }
}

#[async_trait]
impl AccessControl for StaticAccessControl {
    async fn has_access(&self, _user_id: &str, _store_id: &str, _user_email: &str) -> Result<bool> {
        Ok(self.allowed)
    }

    async fn is_global_admin(&self, _email: &str) -> Result<bool> {
        Ok(self.allowed)
    }
}

/// Configurable OAuth provider double.
///
/// Records consent-URL requests and serves canned exchange/refresh/event
/// responses.
pub struct FakeOAuthClient {
    pub consent_calls: Mutex<Vec<(String, String)>>,
    pub exchange_refresh_token: Option<String>,
    pub exchange_fails: bool,
    pub primary_calendar: Result<String>,
    pub events: Vec<RawCalendarEvent>,
    pub refresh_calls: AtomicUsize,
}

impl Default for FakeOAuthClient {
    fn default() -> Self {
        Self {
            consent_calls: Mutex::new(Vec::new()),
            exchange_refresh_token: Some("refresh-token-1".to_string()),
            exchange_fails: false,
            primary_calendar: Ok("owner@example.com".to_string()),
            events: Vec::new(),
            refresh_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeOAuthClient {
    pub fn without_refresh_token() -> Self {
        Self { exchange_refresh_token: None, ..Self::default() }
    }

    pub fn failing_exchange() -> Self {
        Self { exchange_fails: true, ..Self::default() }
    }

    pub fn with_events(events: Vec<RawCalendarEvent>) -> Self {
        Self { events, ..Self::default() }
    }
}

#[async_trait]
impl OAuthClient for FakeOAuthClient {
    fn consent_url(&self, client_id: &str, state: &str) -> Result<String> {
        self.consent_calls.lock().push((client_id.to_string(), state.to_string()));
        Ok(format!(
            "https://accounts.google.com/o/oauth2/v2/auth?client_id={client_id}&state={state}&access_type=offline&prompt=consent"
        ))
    }

    async fn exchange_code(&self, _creds: &OAuthCredentials, _code: &str) -> Result<TokenExchange> {
        if self.exchange_fails {
            return Err(ReservaError::Upstream("exchange".to_string()));
        }
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
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok("access-token-2".to_string())
    }

    async fn primary_calendar_id(&self, _access_token: &str) -> Result<String> {
        self.primary_calendar.clone()
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

/// Reversible sealer with a visible prefix, for asserting ciphertext flow.
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

/// Sealer that always fails, for the `encryption` reason path.
pub struct FailingSealer;

impl TokenSealer for FailingSealer {
    fn seal(&self, _plaintext: &str) -> Result<String> {
        Err(ReservaError::Internal("sealing disabled in this test".to_string()))
    }

    fn open(&self, _envelope: &str) -> Result<String> {
        Err(ReservaError::Internal("opening disabled in this test".to_string()))
    }
}

/// Build a store fixture.
pub fn store_fixture(id: &str) -> Store {
    Store::new(id, "Sakura Hair", "owner@example.com")
}

/// Wrap a value for port injection.
pub fn arc<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
