//! OAuth client credential resolution.
//!
//! Environment variables take precedence over the admin settings rows.
//! Credentials are read on every OAuth-initiating or token-refreshing call
//! and never cached across requests, so a rotated secret takes effect
//! immediately.

use reserva_common::validation::non_empty_trimmed;
use reserva_domain::constants::ADMIN_SCOPE;
use reserva_domain::{ReservaError, Result};
use tracing::debug;

use crate::calendar::ports::OAuthCredentials;
use crate::stores::ports::SettingsRepository;

const ENV_CLIENT_ID: &str = "GOOGLE_OAUTH_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "GOOGLE_OAUTH_CLIENT_SECRET";
const SETTING_CLIENT_ID: &str = "google_oauth_client_id";
const SETTING_CLIENT_SECRET: &str = "google_oauth_client_secret";

/// Resolve the OAuth client pair: environment first, settings rows second.
///
/// Both values must be non-empty after trimming, else the pair counts as
/// "not configured" and a `Config` error is returned.
pub async fn resolve_oauth_credentials(
    settings: &dyn SettingsRepository,
) -> Result<OAuthCredentials> {
    let env_id = std::env::var(ENV_CLIENT_ID).ok();
    let env_secret = std::env::var(ENV_CLIENT_SECRET).ok();

    if let (Some(id), Some(secret)) = (
        env_id.as_deref().and_then(non_empty_trimmed),
        env_secret.as_deref().and_then(non_empty_trimmed),
    ) {
        debug!("resolved OAuth client credentials from environment");
        return Ok(OAuthCredentials { client_id: id.to_string(), client_secret: secret.to_string() });
    }

    let id_row = settings.get_setting(ADMIN_SCOPE, SETTING_CLIENT_ID).await?;
    let secret_row = settings.get_setting(ADMIN_SCOPE, SETTING_CLIENT_SECRET).await?;

    let id = id_row.as_ref().and_then(|row| non_empty_trimmed(&row.value));
    let secret = secret_row.as_ref().and_then(|row| non_empty_trimmed(&row.value));

    match (id, secret) {
        (Some(id), Some(secret)) => {
            debug!("resolved OAuth client credentials from settings");
            Ok(OAuthCredentials { client_id: id.to_string(), client_secret: secret.to_string() })
        }
        _ => Err(ReservaError::Config("google oauth client credentials not configured".to_string())),
    }
}
