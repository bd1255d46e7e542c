//! Application constants
//!
//! Centralized location for the wire-level and session constants shared by
//! the client, the session service and the configuration defaults.

// Request dispatch
pub const PLATFORM_ID_PLACEHOLDER: &str = "{platformId}";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const MAX_AUTH_RETRIES: u8 = 1;

// Session endpoints (relative to the API base URL)
pub const DEFAULT_LOGIN_PATH: &str = "/api/v1/na/profiles/{platformId}/login";
pub const DEFAULT_REFRESH_PATH: &str = "/api/v1/ba/profiles/{platformId}/refresh";
pub const DEFAULT_LOGOUT_PATH: &str = "/api/v1/ba/profiles/{platformId}/logout";

// Anti-forgery token exchange
pub const DEFAULT_CSRF_COOKIE_NAME: &str = "csrf_token";
pub const DEFAULT_CSRF_HEADER_NAME: &str = "X-CSRF-TOKEN";

// Credential persistence
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "com.authconsole.session";
pub const KEYCHAIN_CREDENTIAL_ACCOUNT: &str = "access_token";
pub const KEYCHAIN_PROFILE_ACCOUNT: &str = "profile_id";

// Alert channel
pub const DEFAULT_ALERT_CAPACITY: usize = 32;

// Pagination
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 100;
