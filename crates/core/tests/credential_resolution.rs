//! Credential resolution precedence tests.
//!
//! Kept in their own binary because they mutate process environment
//! variables; the other integration suites rely on a clean environment.

mod support;

use parking_lot::{Mutex, MutexGuard};
use reserva_core::resolve_oauth_credentials;
use reserva_domain::ReservaError;
use support::MockSettingsRepository;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialise tests that touch the process environment.
fn env_guard() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock();
    std::env::remove_var("GOOGLE_OAUTH_CLIENT_ID");
    std::env::remove_var("GOOGLE_OAUTH_CLIENT_SECRET");
    guard
}

#[tokio::test]
async fn environment_pair_takes_precedence_over_settings() {
    let _guard = env_guard();
    std::env::set_var("GOOGLE_OAUTH_CLIENT_ID", "client-from-env");
    std::env::set_var("GOOGLE_OAUTH_CLIENT_SECRET", "secret-from-env");

    let settings = MockSettingsRepository::default().with_oauth_client();
    let creds = resolve_oauth_credentials(&settings).await.unwrap();

    assert_eq!(creds.client_id, "client-from-env");
    assert_eq!(creds.client_secret, "secret-from-env");

    std::env::remove_var("GOOGLE_OAUTH_CLIENT_ID");
    std::env::remove_var("GOOGLE_OAUTH_CLIENT_SECRET");
}

#[tokio::test]
async fn falls_back_to_settings_when_env_is_blank() {
    let _guard = env_guard();
    std::env::set_var("GOOGLE_OAUTH_CLIENT_ID", "   ");

    let settings = MockSettingsRepository::default().with_oauth_client();
    let creds = resolve_oauth_credentials(&settings).await.unwrap();

    assert_eq!(creds.client_id, "client-from-settings");
    assert_eq!(creds.client_secret, "secret-from-settings");

    std::env::remove_var("GOOGLE_OAUTH_CLIENT_ID");
}

#[tokio::test]
async fn missing_everywhere_is_a_config_error() {
    let _guard = env_guard();

    let settings = MockSettingsRepository::default();
    let err = resolve_oauth_credentials(&settings).await.unwrap_err();

    assert!(matches!(err, ReservaError::Config(_)));
}

#[tokio::test]
async fn whitespace_only_settings_count_as_unconfigured() {
    let _guard = env_guard();

    let settings = MockSettingsRepository::default()
        .with_row("_admin", "google_oauth_client_id", "  ")
        .with_row("_admin", "google_oauth_client_secret", "secret");
    let err = resolve_oauth_credentials(&settings).await.unwrap_err();

    assert!(matches!(err, ReservaError::Config(_)));
}
