//! Configuration loader
//!
//! Builds the application configuration from a config file (when one is
//! found) overlaid with environment variables. Environment variables always
//! win.
//!
//! ## Environment Variables
//! - `RESERVA_ENV`: deployment environment (`local`/`staging`/`production`)
//! - `RESERVA_BIND_ADDR`: HTTP listen address
//! - `RESERVA_DATA_DIR`: data directory for the local JSON backend
//! - `RESERVA_REST_BASE_URL`: base URL of the hosted relational store
//! - `RESERVA_SERVICE_ROLE_KEY`: privileged key for the hosted store
//! - `RESERVA_ADMIN_BASE_URL`: admin UI base URL for OAuth redirects
//! - `RESERVA_REDIRECT_URI`: OAuth redirect URI registered with the provider
//! - `RESERVA_TOKEN_CIPHER_KEY`: base64 32-byte key sealing refresh tokens
//!
//! ## File Locations
//! The loader probes `./config.{json,toml}` and `./reserva.{json,toml}` in
//! the working directory and up to two parent directories.

use std::path::{Path, PathBuf};

use reserva_domain::{Config, Environment, ReservaError, Result};

/// Load configuration: file base (when present) plus environment overrides.
///
/// # Errors
/// Returns `ReservaError::Config` if the file is malformed or if required
/// values for the resolved environment are missing.
pub fn load() -> Result<Config> {
    let environment = Environment::resolve()?;

    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("no config file found, starting from defaults");
            Config::default()
        }
    };

    config.environment = environment;
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML (detected by file extension).
///
/// # Errors
/// Returns `ReservaError::Config` if the file is missing or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ReservaError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ReservaError::Config("no config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ReservaError::Config(format!("failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ReservaError::Config(format!("invalid TOML config: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ReservaError::Config(format!("invalid JSON config: {e}"))),
        _ => Err(ReservaError::Config(format!("unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            candidates.extend([
                dir.join("config.json"),
                dir.join("config.toml"),
                dir.join("reserva.json"),
                dir.join("reserva.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(addr) = env_opt("RESERVA_BIND_ADDR") {
        config.server.bind_addr = addr;
    }
    if let Some(dir) = env_opt("RESERVA_DATA_DIR") {
        config.storage.data_dir = dir;
    }
    if let Some(url) = env_opt("RESERVA_REST_BASE_URL") {
        config.storage.rest_base_url = Some(url);
    }
    if let Some(key) = env_opt("RESERVA_SERVICE_ROLE_KEY") {
        config.storage.service_role_key = Some(key);
    }
    if let Some(url) = env_opt("RESERVA_ADMIN_BASE_URL") {
        config.oauth.admin_base_url = url;
    }
    if let Some(uri) = env_opt("RESERVA_REDIRECT_URI") {
        config.oauth.redirect_uri = uri;
    }
    if let Some(key) = env_opt("RESERVA_TOKEN_CIPHER_KEY") {
        config.oauth.token_cipher_key = Some(key);
    }
}

/// Hosted-backend settings are mandatory outside the local environment.
fn validate(config: &Config) -> Result<()> {
    if config.environment.is_local() {
        return Ok(());
    }

    if config.storage.rest_base_url.as_deref().map_or(true, |s| s.trim().is_empty()) {
        return Err(ReservaError::Config(
            "RESERVA_REST_BASE_URL is required outside the local environment".into(),
        ));
    }
    if config.storage.service_role_key.as_deref().map_or(true, |s| s.trim().is_empty()) {
        return Err(ReservaError::Config(
            "RESERVA_SERVICE_ROLE_KEY is required outside the local environment".into(),
        ));
    }
    if config.oauth.token_cipher_key.as_deref().map_or(true, |s| s.trim().is_empty()) {
        return Err(ReservaError::Config(
            "RESERVA_TOKEN_CIPHER_KEY is required outside the local environment".into(),
        ));
    }
    Ok(())
}

/// Non-empty (after trim) environment variable, or `None`.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn env_opt_trims_and_drops_blanks() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("RESERVA_TEST_OPT", "  value  ");
        assert_eq!(env_opt("RESERVA_TEST_OPT").as_deref(), Some("value"));

        std::env::set_var("RESERVA_TEST_OPT", "   ");
        assert_eq!(env_opt("RESERVA_TEST_OPT"), None);

        std::env::remove_var("RESERVA_TEST_OPT");
        assert_eq!(env_opt("RESERVA_TEST_OPT"), None);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("RESERVA_BIND_ADDR", "0.0.0.0:9000");
        std::env::set_var("RESERVA_DATA_DIR", "/var/lib/reserva");

        let mut config = Config::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.storage.data_dir, "/var/lib/reserva");

        std::env::remove_var("RESERVA_BIND_ADDR");
        std::env::remove_var("RESERVA_DATA_DIR");
    }

    #[test]
    fn load_from_file_toml() {
        let toml_content = r#"
environment = "local"

[server]
bind_addr = "127.0.0.1:8080"

[storage]
data_dir = "testdata"

[oauth]
admin_base_url = "http://localhost:3000/admin"
redirect_uri = "http://localhost:8080/api/google-calendar/callback"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config");
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.storage.data_dir, "testdata");
        assert_eq!(config.storage.rest_base_url, None);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_json() {
        let json_content = r#"{
            "environment": "local",
            "server": { "bind_addr": "127.0.0.1:8081" },
            "storage": { "data_dir": "data" },
            "oauth": {
                "admin_base_url": "http://localhost:3000/admin",
                "redirect_uri": "http://localhost:8081/api/google-calendar/callback"
            }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).expect("config");
        assert_eq!(config.server.bind_addr, "127.0.0.1:8081");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(ReservaError::Config(_))));
    }

    #[test]
    fn parse_config_rejects_unsupported_format() {
        let result = parse_config("anything", &PathBuf::from("config.yaml"));
        assert!(matches!(result, Err(ReservaError::Config(_))));
    }

    #[test]
    fn hosted_settings_required_outside_local() {
        let mut config = Config::default();
        config.environment = Environment::Production;

        assert!(matches!(validate(&config), Err(ReservaError::Config(_))));

        config.storage.rest_base_url = Some("https://rest.example.com".to_string());
        config.storage.service_role_key = Some("service-key".to_string());
        config.oauth.token_cipher_key = Some("a".repeat(44));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn local_environment_needs_no_hosted_settings() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }
}
