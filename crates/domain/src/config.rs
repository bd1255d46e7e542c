//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CSRF_COOKIE_NAME, DEFAULT_CSRF_HEADER_NAME, DEFAULT_KEYCHAIN_SERVICE,
    DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH, DEFAULT_REFRESH_PATH, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative request path is joined to
    pub base_url: String,
    /// Application id substituted for `{platformId}` in request URLs
    pub platform_id: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Share one refresh between concurrent 401s instead of refreshing per call
    #[serde(default)]
    pub single_flight_refresh: bool,
}

/// Session endpoints, anti-forgery exchange and credential persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub login_path: String,
    pub refresh_path: String,
    pub logout_path: String,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    pub storage: CredentialStorage,
    pub keychain_service: String,
}

/// Where the bearer credential is persisted between runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStorage {
    /// Process memory only; the session ends with the process
    #[default]
    Memory,
    /// Platform keychain (macOS Keychain, Windows Credential Manager, Secret
    /// Service)
    Keychain,
}

crate::impl_wire_enum_conversions!(CredentialStorage {
    Memory => "memory",
    Keychain => "keychain",
});

/// Tracing subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, platform_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            platform_id: platform_id.into(),
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            single_flight_refresh: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            logout_path: DEFAULT_LOGOUT_PATH.to_string(),
            csrf_cookie_name: DEFAULT_CSRF_COOKIE_NAME.to_string(),
            csrf_header_name: DEFAULT_CSRF_HEADER_NAME.to_string(),
            storage: CredentialStorage::default(),
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
