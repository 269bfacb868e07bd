//! Port interfaces for authentication and authorization
//!
//! These traits define the boundaries between core business logic and the
//! identity/authorization collaborators, which are treated as black boxes.

use async_trait::async_trait;
use reserva_domain::Result;
use serde::{Deserialize, Serialize};

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

/// Trait for exchanging a bearer token for a caller identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token into an identity.
    ///
    /// Returns `ReservaError::Auth` for missing or invalid tokens.
    async fn authenticate(&self, bearer_token: &str) -> Result<Identity>;
}

/// Trait for tenant-scoped authorization checks.
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// True when the user may administer the given store (service-wide
    /// admin or admin scoped to that store).
    async fn has_access(&self, user_id: &str, store_id: &str, user_email: &str) -> Result<bool>;

    /// True when the email belongs to a global administrator.
    async fn is_global_admin(&self, email: &str) -> Result<bool>;
}
