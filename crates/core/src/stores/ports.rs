//! Port interfaces for store and settings persistence
//!
//! Both backends (JSON files in local mode, hosted REST elsewhere) must
//! honour the same contract: list operations return an empty collection
//! when nothing matches, single-record lookups return `NotFound`.

use async_trait::async_trait;
use reserva_domain::{Result, Setting, Store};

/// Trait for persisting stores (tenants).
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Fetch a store by id. `NotFound` when absent.
    async fn get_store(&self, id: &str) -> Result<Store>;

    /// List all stores.
    async fn list_stores(&self) -> Result<Vec<Store>>;

    /// Insert a new store. `Validation` error on duplicate id.
    async fn insert_store(&self, store: Store) -> Result<()>;

    /// Persist an updated store. `NotFound` when absent.
    async fn update_store(&self, store: &Store) -> Result<()>;
}

/// Trait for the admin-scoped key/value settings table.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read one settings row. `Ok(None)` when absent — absence is not an
    /// error here because credential resolution has a fallback chain.
    async fn get_setting(&self, scope: &str, key: &str) -> Result<Option<Setting>>;

    /// Insert or replace a settings row.
    async fn put_setting(&self, setting: Setting) -> Result<()>;
}
