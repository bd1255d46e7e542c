//! Refresh-and-replay decision rule

use authconsole_domain::constants::MAX_AUTH_RETRIES;

/// URL targets a session endpoint that must never trigger a refresh
///
/// Query string and fragment are ignored, as is a trailing slash.
pub fn is_session_endpoint(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url).trim_end_matches('/');
    path.ends_with("logout") || path.ends_with("refresh")
}

/// A failed attempt qualifies for one silent refresh followed by a replay
///
/// `attempt` counts replays already made for this logical call.
pub fn should_refresh(status: u16, url: &str, attempt: u8) -> bool {
    status == 401 && attempt < MAX_AUTH_RETRIES && !is_session_endpoint(url)
}
