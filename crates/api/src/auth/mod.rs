//! Identity and access-control adapters.
//!
//! Local runs get a fixed developer identity; hosted runs verify the
//! bearer token against the auth service sitting next to the hosted
//! store. Authorization is ownership-based: a store's owner email, or a
//! global administrator, may administer it.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reserva_core::{AccessControl, Identity, IdentityProvider, StoreRepository};
use reserva_domain::{ReservaError, Result};
use reserva_infra::HttpClient;
use serde::Deserialize;
use tracing::instrument;

/// Accepts any non-empty token and answers with a fixed developer
/// identity. Local environment only.
pub struct DevIdentityProvider;

#[async_trait]
impl IdentityProvider for DevIdentityProvider {
    async fn authenticate(&self, bearer_token: &str) -> Result<Identity> {
        if bearer_token.trim().is_empty() {
            return Err(ReservaError::Auth("missing bearer token".into()));
        }
        Ok(Identity { user_id: "local-dev".to_string(), email: "dev@localhost".to_string() })
    }
}

/// Verifies bearer tokens against the hosted auth service.
pub struct RestIdentityProvider {
    http: HttpClient,
    auth_base_url: String,
}

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: String,
    email: String,
}

impl RestIdentityProvider {
    pub fn new(http: HttpClient, auth_base_url: impl Into<String>) -> Self {
        let mut auth_base_url = auth_base_url.into();
        while auth_base_url.ends_with('/') {
            auth_base_url.pop();
        }
        Self { http, auth_base_url }
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    #[instrument(skip(self, bearer_token))]
    async fn authenticate(&self, bearer_token: &str) -> Result<Identity> {
        if bearer_token.trim().is_empty() {
            return Err(ReservaError::Auth("missing bearer token".into()));
        }

        let url = format!("{}/user", self.auth_base_url);
        let builder = self.http.request(Method::GET, &url).bearer_auth(bearer_token);
        let response = self.http.send(builder).await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ReservaError::Auth("bearer token rejected".into()));
        }
        if !response.status().is_success() {
            return Err(ReservaError::Upstream("auth".into()));
        }

        let user: AuthUserResponse =
            response.json().await.map_err(|_| ReservaError::Upstream("auth".into()))?;
        Ok(Identity { user_id: user.id, email: user.email })
    }
}

/// Ownership-based access control.
///
/// A caller may administer a store when their email matches the store's
/// owner email, or when they are a global administrator.
pub struct OwnerAccessControl {
    stores: Arc<dyn StoreRepository>,
    global_admins: Vec<String>,
}

impl OwnerAccessControl {
    pub fn new(stores: Arc<dyn StoreRepository>, global_admins: Vec<String>) -> Self {
        let global_admins =
            global_admins.into_iter().map(|e| e.trim().to_ascii_lowercase()).collect();
        Self { stores, global_admins }
    }

    /// Parse a comma-separated admin list, as carried in
    /// `RESERVA_GLOBAL_ADMINS`.
    pub fn from_admin_list(stores: Arc<dyn StoreRepository>, list: &str) -> Self {
        let admins = list.split(',').map(str::to_string).filter(|s| !s.trim().is_empty()).collect();
        Self::new(stores, admins)
    }
}

#[async_trait]
impl AccessControl for OwnerAccessControl {
    async fn has_access(&self, _user_id: &str, store_id: &str, user_email: &str) -> Result<bool> {
        if self.is_global_admin(user_email).await? {
            return Ok(true);
        }
        let store = self.stores.get_store(store_id).await?;
        Ok(store.owner_email.eq_ignore_ascii_case(user_email))
    }

    async fn is_global_admin(&self, email: &str) -> Result<bool> {
        Ok(self.global_admins.iter().any(|admin| admin == &email.trim().to_ascii_lowercase()))
    }
}
