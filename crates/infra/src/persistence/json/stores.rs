//! File-backed store repository.

use std::path::PathBuf;

use async_trait::async_trait;
use reserva_core::StoreRepository;
use reserva_domain::{ReservaError, Result, Store};
use tracing::instrument;

use super::collection::JsonCollection;

pub struct JsonStoreRepository {
    collection: JsonCollection<Store>,
}

impl JsonStoreRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { collection: JsonCollection::new(path) }
    }
}

#[async_trait]
impl StoreRepository for JsonStoreRepository {
    #[instrument(skip(self))]
    async fn get_store(&self, id: &str) -> Result<Store> {
        self.collection
            .read()
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ReservaError::NotFound(format!("store {id}")))
    }

    #[instrument(skip(self))]
    async fn list_stores(&self) -> Result<Vec<Store>> {
        let mut stores = self.collection.read().await?;
        stores.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stores)
    }

    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn insert_store(&self, store: Store) -> Result<()> {
        self.collection
            .update(|stores| {
                if stores.iter().any(|s| s.id == store.id) {
                    return Err(ReservaError::Validation(format!(
                        "store id already exists: {}",
                        store.id
                    )));
                }
                stores.push(store);
                Ok(())
            })
            .await
    }

    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn update_store(&self, store: &Store) -> Result<()> {
        self.collection
            .update(|stores| {
                let slot = stores
                    .iter_mut()
                    .find(|s| s.id == store.id)
                    .ok_or_else(|| ReservaError::NotFound(format!("store {}", store.id)))?;
                *slot = store.clone();
                Ok(())
            })
            .await
    }
}
