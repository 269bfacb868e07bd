//! File-backed stylist roster, one document per store.

use std::path::PathBuf;

use async_trait::async_trait;
use reserva_core::StylistRepository;
use reserva_domain::{Result, Stylist};
use tracing::instrument;

use super::collection::JsonDirectory;

pub struct JsonStylistRepository {
    directory: JsonDirectory<Stylist>,
}

impl JsonStylistRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { directory: JsonDirectory::new(dir) }
    }
}

#[async_trait]
impl StylistRepository for JsonStylistRepository {
    #[instrument(skip(self))]
    async fn list_stylists(&self, store_id: &str) -> Result<Vec<Stylist>> {
        let mut stylists = self.directory.read(store_id).await?;
        stylists.sort_by_key(|s| s.display_order);
        Ok(stylists)
    }

    #[instrument(skip(self, stylists))]
    async fn replace_stylists(&self, store_id: &str, stylists: Vec<Stylist>) -> Result<()> {
        self.directory
            .update(store_id, |current| {
                *current = stylists;
                Ok(())
            })
            .await
    }
}
