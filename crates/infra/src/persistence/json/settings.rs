//! File-backed settings rows, one document per scope.
//!
//! A scope is a store id or the platform admin scope.

use std::path::PathBuf;

use async_trait::async_trait;
use reserva_core::SettingsRepository;
use reserva_domain::{Result, Setting};
use tracing::instrument;

use super::collection::JsonDirectory;

pub struct JsonSettingsRepository {
    directory: JsonDirectory<Setting>,
}

impl JsonSettingsRepository {
    pub fn new(dir: PathBuf) -> Self {
        Self { directory: JsonDirectory::new(dir) }
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    #[instrument(skip(self))]
    async fn get_setting(&self, scope: &str, key: &str) -> Result<Option<Setting>> {
        Ok(self.directory.read(scope).await?.into_iter().find(|s| s.key == key))
    }

    #[instrument(skip(self, setting), fields(scope = %setting.store_id, key = %setting.key))]
    async fn put_setting(&self, setting: Setting) -> Result<()> {
        let scope = setting.store_id.clone();
        self.directory
            .update(&scope, |rows| {
                if let Some(slot) = rows.iter_mut().find(|s| s.key == setting.key) {
                    *slot = setting;
                } else {
                    rows.push(setting);
                }
                Ok(())
            })
            .await
    }
}
