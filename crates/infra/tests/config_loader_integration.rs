//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files and
//! building a console from it.

use std::io::Write;
use std::path::PathBuf;

use authconsole_domain::{ConsoleError, CredentialStorage};
use authconsole_infra::{config, ConsoleContext};
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_load_config_from_json_file() {
    let (_file, path) = write_config(
        r#"{
            "api": {
                "base_url": "https://auth.example.test",
                "platform_id": "12",
                "timeout_seconds": 20,
                "single_flight_refresh": true
            },
            "session": {
                "refresh_path": "/api/v2/ba/profiles/{platformId}/refresh",
                "csrf_header_name": "X-XSRF-TOKEN"
            },
            "logging": { "level": "debug", "json": true }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("JSON config should load");

    assert_eq!(config.api.base_url, "https://auth.example.test");
    assert_eq!(config.api.platform_id, "12");
    assert_eq!(config.api.timeout_seconds, 20);
    assert!(config.api.single_flight_refresh);
    assert_eq!(config.session.refresh_path, "/api/v2/ba/profiles/{platformId}/refresh");
    assert_eq!(config.session.csrf_header_name, "X-XSRF-TOKEN");
    assert_eq!(config.session.csrf_cookie_name, "csrf_token");
    assert_eq!(config.session.storage, CredentialStorage::Memory);
    assert!(config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let (_file, path) = write_config(
        r#"
[api]
base_url = "http://localhost:8080"
platform_id = "3"

[session]
storage = "memory"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config should load");
    assert_eq!(config.api.timeout_seconds, 15);
    assert!(!config.api.single_flight_refresh);
    assert_eq!(config.logging.level, "info");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_required_section_is_a_config_error() {
    let (_file, path) = write_config(r#"{ "logging": { "level": "info" } }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(ConsoleError::Config(_))));

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_loaded_config_builds_a_console() {
    let (_file, path) = write_config(
        r#"{ "api": { "base_url": "http://127.0.0.1:9", "platform_id": "7" } }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config should load");
    let console = ConsoleContext::from_config(config).expect("console should build");

    assert_eq!(console.client().config().timeout.as_secs(), 15);
    assert!(!console.session().is_authenticated().await.expect("store readable"));

    std::fs::remove_file(path).ok();
}
