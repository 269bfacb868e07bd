//! Hosted settings rows.

use std::sync::Arc;

use async_trait::async_trait;
use reserva_core::SettingsRepository;
use reserva_domain::{Result, Setting};
use tracing::instrument;

use super::client::RestClient;

const TABLE: &str = "settings";

pub struct RestSettingsRepository {
    client: Arc<RestClient>,
}

impl RestSettingsRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SettingsRepository for RestSettingsRepository {
    #[instrument(skip(self))]
    async fn get_setting(&self, scope: &str, key: &str) -> Result<Option<Setting>> {
        let query = [
            ("store_id", format!("eq.{scope}")),
            ("key", format!("eq.{key}")),
            ("limit", "1".to_string()),
        ];
        let rows: Vec<Setting> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().next())
    }

    #[instrument(skip(self, setting), fields(scope = %setting.store_id, key = %setting.key))]
    async fn put_setting(&self, setting: Setting) -> Result<()> {
        self.client.upsert(TABLE, "store_id,key", &setting).await
    }
}
