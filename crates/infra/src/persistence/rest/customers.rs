//! Hosted customer repository.

use std::sync::Arc;

use async_trait::async_trait;
use reserva_core::CustomerRepository;
use reserva_domain::{Customer, ReservaError, Result};
use tracing::instrument;
use uuid::Uuid;

use super::client::RestClient;

const TABLE: &str = "customers";

pub struct RestCustomerRepository {
    client: Arc<RestClient>,
}

impl RestCustomerRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CustomerRepository for RestCustomerRepository {
    #[instrument(skip(self))]
    async fn list_customers(&self, store_id: &str) -> Result<Vec<Customer>> {
        let query = [
            ("store_id", format!("eq.{store_id}")),
            ("order", "kana.asc.nullsfirst,name.asc".to_string()),
        ];
        self.client.select(TABLE, &query).await
    }

    #[instrument(skip(self))]
    async fn get_customer(&self, store_id: &str, id: Uuid) -> Result<Customer> {
        let query = [
            ("id", format!("eq.{id}")),
            ("store_id", format!("eq.{store_id}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<Customer> = self.client.select(TABLE, &query).await?;
        rows.into_iter().next().ok_or_else(|| ReservaError::NotFound(format!("customer {id}")))
    }

    #[instrument(skip(self, customer), fields(store_id = %customer.store_id))]
    async fn insert_customer(&self, customer: Customer) -> Result<()> {
        self.client.insert(TABLE, std::slice::from_ref(&customer)).await
    }
}
