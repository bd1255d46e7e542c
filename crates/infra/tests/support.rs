//! Shared fixtures for the integration tests
#![allow(dead_code)]

use authconsole_domain::{ApiConfig, Config, LoggingConfig, SessionConfig};
use authconsole_infra::ConsoleContext;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PLATFORM_ID: &str = "7";
pub const PROFILE_ID: i64 = 5;
pub const LOGIN_PATH: &str = "/api/v1/na/profiles/7/login";
pub const REFRESH_PATH: &str = "/api/v1/ba/profiles/7/refresh";
pub const LOGOUT_PATH: &str = "/api/v1/ba/profiles/7/logout";
pub const CSRF_TOKEN: &str = "csrf-abc";

pub fn config_for(server: &MockServer, single_flight_refresh: bool) -> Config {
    let mut api = ApiConfig::new(server.uri(), PLATFORM_ID);
    api.single_flight_refresh = single_flight_refresh;
    Config { api, session: SessionConfig::default(), logging: LoggingConfig::default() }
}

pub fn console_for(server: &MockServer, single_flight_refresh: bool) -> ConsoleContext {
    ConsoleContext::from_config(config_for(server, single_flight_refresh))
        .expect("console context should build")
}

/// Envelope carrying a credential and the profile it belongs to
pub fn token_envelope(token: &str) -> Value {
    json!({
        "data": {
            "token": token,
            "profile": { "id": PROFILE_ID, "email": "admin@example.test" }
        },
        "responseMetadata": {}
    })
}

pub fn list_envelope(items: Value) -> Value {
    json!({
        "data": items,
        "responseMetadata": {
            "responsePageInfo": { "totalItems": 1, "totalPages": 1, "pageNumber": 1, "perPage": 100 }
        }
    })
}

/// Login answering with `token` and setting the refresh and anti-forgery
/// cookies
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "refresh_token=r1; Path=/; HttpOnly")
                .append_header("set-cookie", format!("csrf_token={CSRF_TOKEN}; Path=/"))
                .set_body_json(token_envelope(token)),
        )
        .mount(server)
        .await;
}
