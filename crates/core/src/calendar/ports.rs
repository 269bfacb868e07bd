//! Calendar provider and token-sealing port interfaces
//!
//! The external calendar provider is consumed only through these
//! operations; core never sees a provider SDK type.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reserva_common::TokenCipher;
use reserva_domain::{ReservaError, Result};

/// OAuth client id/secret pair, resolved per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Result of exchanging an authorization code for tokens.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    pub access_token: String,
    /// Absent when the provider declined to reissue one; the linker treats
    /// this as a hard failure because re-consent is always requested.
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

/// Raw event fields as fetched from the provider.
#[derive(Debug, Clone)]
pub struct RawCalendarEvent {
    pub id: String,
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Trait for the external OAuth2 + calendar provider.
#[async_trait]
pub trait OAuthClient: Send + Sync {
    /// Build the consent URL for the authorization redirect.
    ///
    /// Implementations must request offline access and force re-consent
    /// (`access_type=offline&prompt=consent`) on every initiation so a
    /// refresh token is issued even for repeat authorizations.
    fn consent_url(&self, client_id: &str, state: &str) -> Result<String>;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, creds: &OAuthCredentials, code: &str) -> Result<TokenExchange>;

    /// Mint a short-lived access token from a refresh token.
    async fn refresh_access_token(
        &self,
        creds: &OAuthCredentials,
        refresh_token: &str,
    ) -> Result<String>;

    /// Look up the account's primary calendar identifier.
    async fn primary_calendar_id(&self, access_token: &str) -> Result<String>;

    /// List events within `[start, end]`, ordered by start time.
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawCalendarEvent>>;
}

/// Trait for sealing refresh tokens at rest.
///
/// The same sealer must be used at callback (write) time and at
/// calendar-read (decrypt) time.
pub trait TokenSealer: Send + Sync {
    fn seal(&self, plaintext: &str) -> Result<String>;
    fn open(&self, envelope: &str) -> Result<String>;
}

impl TokenSealer for TokenCipher {
    fn seal(&self, plaintext: &str) -> Result<String> {
        TokenCipher::seal(self, plaintext)
            .map_err(|e| ReservaError::Internal(format!("token encryption failed: {e}")))
    }

    fn open(&self, envelope: &str) -> Result<String> {
        TokenCipher::open(self, envelope)
            .map_err(|e| ReservaError::Internal(format!("token decryption failed: {e}")))
    }
}
