//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the process environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If the required variables are missing, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `AUTHCONSOLE_API_BASE_URL`: Base URL of the API (required)
//! - `AUTHCONSOLE_PLATFORM_ID`: Application id for `{platformId}` (required)
//! - `AUTHCONSOLE_API_TIMEOUT_SECS`: Per-call timeout in seconds
//! - `AUTHCONSOLE_SINGLE_FLIGHT_REFRESH`: Share one refresh between
//!   concurrent 401s (true/false)
//! - `AUTHCONSOLE_CREDENTIAL_STORAGE`: `memory` or `keychain`
//! - `AUTHCONSOLE_KEYCHAIN_SERVICE`: Keychain service name
//! - `AUTHCONSOLE_LOG_LEVEL`: Default tracing filter
//! - `AUTHCONSOLE_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./authconsole.json` or `./authconsole.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use authconsole_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use authconsole_domain::{
    ApiConfig, Config, ConsoleError, CredentialStorage, LoggingConfig, Result, SessionConfig,
};
use url::Url;

const ENV_BASE_URL: &str = "AUTHCONSOLE_API_BASE_URL";
const ENV_PLATFORM_ID: &str = "AUTHCONSOLE_PLATFORM_ID";
const ENV_TIMEOUT_SECS: &str = "AUTHCONSOLE_API_TIMEOUT_SECS";
const ENV_SINGLE_FLIGHT: &str = "AUTHCONSOLE_SINGLE_FLIGHT_REFRESH";
const ENV_STORAGE: &str = "AUTHCONSOLE_CREDENTIAL_STORAGE";
const ENV_KEYCHAIN_SERVICE: &str = "AUTHCONSOLE_KEYCHAIN_SERVICE";
const ENV_LOG_LEVEL: &str = "AUTHCONSOLE_LOG_LEVEL";
const ENV_LOG_JSON: &str = "AUTHCONSOLE_LOG_JSON";

/// Load configuration with automatic fallback strategy
///
/// Reads `.env` first, then attempts environment variables. If a required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `ConsoleError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The base URL and platform id are required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `ConsoleError::Config` if required variables are missing or a
/// value cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(ENV_BASE_URL)?;
    let platform_id = env_var(ENV_PLATFORM_ID)?;

    let timeout_seconds = match optional_env(ENV_TIMEOUT_SECS) {
        Some(value) => value
            .parse::<u64>()
            .map_err(|e| ConsoleError::Config(format!("Invalid timeout: {e}")))?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    let mut session = SessionConfig::default();
    if let Some(value) = optional_env(ENV_STORAGE) {
        session.storage = value.parse::<CredentialStorage>().map_err(|_| {
            ConsoleError::Config(format!("Invalid credential storage: {value}"))
        })?;
    }
    if let Some(service) = optional_env(ENV_KEYCHAIN_SERVICE) {
        session.keychain_service = service;
    }

    let mut logging = LoggingConfig::default();
    if let Some(level) = optional_env(ENV_LOG_LEVEL) {
        logging.level = level;
    }
    logging.json = env_bool(ENV_LOG_JSON, false);

    let config = Config {
        api: ApiConfig {
            base_url,
            platform_id,
            timeout_seconds,
            single_flight_refresh: env_bool(ENV_SINGLE_FLIGHT, false),
        },
        session,
        logging,
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ConsoleError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConsoleError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConsoleError::Config("No config file found in standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ConsoleError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConsoleError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConsoleError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ConsoleError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Reject values the client cannot work with
fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.api.base_url)
        .map_err(|e| ConsoleError::Config(format!("Invalid API base URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConsoleError::Config(format!(
            "API base URL must be http or https, got {}",
            url.scheme()
        )));
    }
    if config.api.platform_id.trim().is_empty() {
        return Err(ConsoleError::Config("Platform id must not be empty".to_string()));
    }
    if config.api.timeout_seconds == 0 {
        return Err(ConsoleError::Config("Timeout must be at least one second".to_string()));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./authconsole.{json,toml}`)
/// 2. Parent directory
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
        candidates.push(cwd.join("../config.json"));
        candidates.push(cwd.join("../config.toml"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("authconsole.json"),
        dir.join("authconsole.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `ConsoleError::Config` if the variable is unset or blank.
fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        ConsoleError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
