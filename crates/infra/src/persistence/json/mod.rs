//! JSON-file persistence backend for local development.

mod collection;
mod customers;
mod reservations;
mod settings;
mod stores;
mod stylists;

use std::path::PathBuf;
use std::sync::Arc;

pub use customers::JsonCustomerRepository;
pub use reservations::JsonReservationRepository;
pub use settings::JsonSettingsRepository;
pub use stores::JsonStoreRepository;
pub use stylists::JsonStylistRepository;

/// All repositories of the file backend, rooted at one data directory.
pub struct JsonBackend {
    pub stores: Arc<JsonStoreRepository>,
    pub reservations: Arc<JsonReservationRepository>,
    pub customers: Arc<JsonCustomerRepository>,
    pub stylists: Arc<JsonStylistRepository>,
    pub settings: Arc<JsonSettingsRepository>,
}

impl JsonBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        Self {
            stores: Arc::new(JsonStoreRepository::new(dir.join("stores.json"))),
            reservations: Arc::new(JsonReservationRepository::new(dir.join("reservations.json"))),
            customers: Arc::new(JsonCustomerRepository::new(dir.join("customers.json"))),
            stylists: Arc::new(JsonStylistRepository::new(dir.join("stylists"))),
            settings: Arc::new(JsonSettingsRepository::new(dir.join("settings"))),
        }
    }
}
