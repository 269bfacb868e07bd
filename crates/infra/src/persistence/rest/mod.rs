//! Hosted REST persistence backend for staging and production.

mod client;
mod customers;
mod reservations;
mod settings;
mod stores;
mod stylists;

use std::sync::Arc;

pub use client::RestClient;
pub use customers::RestCustomerRepository;
pub use reservations::RestReservationRepository;
pub use settings::RestSettingsRepository;
pub use stores::RestStoreRepository;
pub use stylists::RestStylistRepository;

use crate::http::HttpClient;

/// All repositories of the hosted backend, sharing one client.
pub struct RestBackend {
    pub stores: Arc<RestStoreRepository>,
    pub reservations: Arc<RestReservationRepository>,
    pub customers: Arc<RestCustomerRepository>,
    pub stylists: Arc<RestStylistRepository>,
    pub settings: Arc<RestSettingsRepository>,
}

impl RestBackend {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        service_role_key: impl Into<String>,
    ) -> Self {
        let client = Arc::new(RestClient::new(http, base_url, service_role_key));
        Self {
            stores: Arc::new(RestStoreRepository::new(Arc::clone(&client))),
            reservations: Arc::new(RestReservationRepository::new(Arc::clone(&client))),
            customers: Arc::new(RestCustomerRepository::new(Arc::clone(&client))),
            stylists: Arc::new(RestStylistRepository::new(Arc::clone(&client))),
            settings: Arc::new(RestSettingsRepository::new(client)),
        }
    }
}
