//! Hosted stylist roster.
//!
//! The roster is replaced wholesale: delete the store's rows, then insert
//! the new list. The hosted store keeps each statement atomic; the brief
//! window between the two is accepted for this admin-only surface.

use std::sync::Arc;

use async_trait::async_trait;
use reserva_core::StylistRepository;
use reserva_domain::{Result, Stylist};
use tracing::instrument;

use super::client::RestClient;

const TABLE: &str = "stylists";

pub struct RestStylistRepository {
    client: Arc<RestClient>,
}

impl RestStylistRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StylistRepository for RestStylistRepository {
    #[instrument(skip(self))]
    async fn list_stylists(&self, store_id: &str) -> Result<Vec<Stylist>> {
        let query = [
            ("store_id", format!("eq.{store_id}")),
            ("order", "display_order.asc".to_string()),
        ];
        self.client.select(TABLE, &query).await
    }

    #[instrument(skip(self, stylists))]
    async fn replace_stylists(&self, store_id: &str, stylists: Vec<Stylist>) -> Result<()> {
        let query = [("store_id", format!("eq.{store_id}"))];
        self.client.delete(TABLE, &query).await?;
        if stylists.is_empty() {
            return Ok(());
        }
        self.client.insert(TABLE, &stylists).await
    }
}
