//! File-backed customer repository.

use std::path::PathBuf;

use async_trait::async_trait;
use reserva_core::CustomerRepository;
use reserva_domain::{Customer, ReservaError, Result};
use tracing::instrument;
use uuid::Uuid;

use super::collection::JsonCollection;

pub struct JsonCustomerRepository {
    collection: JsonCollection<Customer>,
}

impl JsonCustomerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { collection: JsonCollection::new(path) }
    }
}

#[async_trait]
impl CustomerRepository for JsonCustomerRepository {
    #[instrument(skip(self))]
    async fn list_customers(&self, store_id: &str) -> Result<Vec<Customer>> {
        let mut customers: Vec<Customer> = self
            .collection
            .read()
            .await?
            .into_iter()
            .filter(|c| c.store_id == store_id)
            .collect();
        // Kana ordering with name as tiebreak; customers without kana sort first.
        customers.sort_by(|a, b| {
            a.kana.cmp(&b.kana).then_with(|| a.name.cmp(&b.name))
        });
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn get_customer(&self, store_id: &str, id: Uuid) -> Result<Customer> {
        self.collection
            .read()
            .await?
            .into_iter()
            .find(|c| c.store_id == store_id && c.id == id)
            .ok_or_else(|| ReservaError::NotFound(format!("customer {id}")))
    }

    #[instrument(skip(self, customer), fields(store_id = %customer.store_id))]
    async fn insert_customer(&self, customer: Customer) -> Result<()> {
        self.collection
            .update(|customers| {
                customers.push(customer);
                Ok(())
            })
            .await
    }
}
