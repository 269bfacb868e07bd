//! Configuration management

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::errors::{ReservaError, Result};

/// Deployment environment, resolved once per process.
///
/// Every persistence and integration choice branches on this exactly once,
/// at context construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Staging,
    Production,
}

static RESOLVED_ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

impl Environment {
    /// Resolve the environment from `RESERVA_ENV`, memoised process-wide.
    ///
    /// Absence defaults to [`Environment::Local`]; an unrecognised value is
    /// a configuration error.
    pub fn resolve() -> Result<Self> {
        if let Some(env) = RESOLVED_ENVIRONMENT.get() {
            return Ok(*env);
        }
        let env = match std::env::var("RESERVA_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Self::Local,
        };
        Ok(*RESOLVED_ENVIRONMENT.get_or_init(|| env))
    }

    /// True when running in the local single-developer environment.
    pub fn is_local(self) -> bool {
        self == Self::Local
    }
}

impl FromStr for Environment {
    type Err = ReservaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(ReservaError::Config(format!("unknown environment: {other}"))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Staging => "staging",
            Self::Production => "production",
        };
        f.write_str(name)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub oauth: OAuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

/// Persistence configuration
///
/// `data_dir` backs the local JSON store; the REST fields configure the
/// hosted relational backend and are required outside `local`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    #[serde(default)]
    pub rest_base_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub service_role_key: Option<String>,
}

/// OAuth and admin-redirect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Base URL of the admin UI, target of connect/callback redirects.
    pub admin_base_url: String,
    /// Redirect URI registered with the calendar provider.
    pub redirect_uri: String,
    /// Base64-encoded 32-byte key for sealing refresh tokens.
    #[serde(default, skip_serializing)]
    pub token_cipher_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            server: ServerConfig { bind_addr: "127.0.0.1:8787".to_string() },
            storage: StorageConfig {
                data_dir: "data".to_string(),
                rest_base_url: None,
                service_role_key: None,
            },
            oauth: OAuthConfig {
                admin_base_url: "http://localhost:3000/admin".to_string(),
                redirect_uri: "http://localhost:8787/api/google-calendar/callback".to_string(),
                token_cipher_key: None,
            },
        }
    }
}
