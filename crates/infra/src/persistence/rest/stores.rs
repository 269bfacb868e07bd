//! Hosted store repository.

use std::sync::Arc;

use async_trait::async_trait;
use reserva_core::StoreRepository;
use reserva_domain::{ReservaError, Result, Store};
use tracing::instrument;

use super::client::RestClient;

const TABLE: &str = "stores";

pub struct RestStoreRepository {
    client: Arc<RestClient>,
}

impl RestStoreRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StoreRepository for RestStoreRepository {
    #[instrument(skip(self))]
    async fn get_store(&self, id: &str) -> Result<Store> {
        let query = [("id", format!("eq.{id}")), ("limit", "1".to_string())];
        let rows: Vec<Store> = self.client.select(TABLE, &query).await?;
        rows.into_iter().next().ok_or_else(|| ReservaError::NotFound(format!("store {id}")))
    }

    #[instrument(skip(self))]
    async fn list_stores(&self) -> Result<Vec<Store>> {
        let query = [("order", "id.asc".to_string())];
        self.client.select(TABLE, &query).await
    }

    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn insert_store(&self, store: Store) -> Result<()> {
        self.client.insert(TABLE, std::slice::from_ref(&store)).await
    }

    #[instrument(skip(self, store), fields(store_id = %store.id))]
    async fn update_store(&self, store: &Store) -> Result<()> {
        let query = [("id", format!("eq.{}", store.id))];
        let matched = self.client.update(TABLE, &query, store).await?;
        if matched == 0 {
            return Err(ReservaError::NotFound(format!("store {}", store.id)));
        }
        Ok(())
    }
}
