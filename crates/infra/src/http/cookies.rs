//! Session cookie jar
//!
//! A `reqwest` cookie store that records what the server sets (the refresh
//! cookie and the anti-forgery token) and hands it back on credentialed
//! requests. Unlike `reqwest::cookie::Jar` it can be read by name and
//! cleared, which the refresh exchange and logout need.

use std::collections::HashMap;

use authconsole_core::CookieReader;
use cookie::Cookie;
use parking_lot::RwLock;
use reqwest::header::HeaderValue;
use time::{Duration, OffsetDateTime};
use tracing::trace;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CookieKey {
    domain: String,
    path: String,
    name: String,
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    host_only: bool,
    secure: bool,
    expires: Option<OffsetDateTime>,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }
}

/// Cookie store shared by every credentialed request
#[derive(Debug, Default)]
pub struct SessionCookieJar {
    cookies: RwLock<HashMap<CookieKey, StoredCookie>>,
}

impl SessionCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `Set-Cookie` value as if `url` had sent it
    pub fn add_cookie_str(&self, set_cookie: &str, url: &Url) {
        let Ok(parsed) = Cookie::parse(set_cookie) else {
            trace!(url = %url, "ignoring unparseable Set-Cookie header");
            return;
        };
        let Some(host) = url.host_str() else {
            return;
        };

        let (domain, host_only) = match parsed.domain().map(|d| d.trim_start_matches('.')) {
            Some(domain) if domain_matches(host, domain) => (domain.to_ascii_lowercase(), false),
            Some(_) => {
                trace!(url = %url, cookie = parsed.name(), "rejecting cookie for foreign domain");
                return;
            }
            None => (host.to_ascii_lowercase(), true),
        };

        let path = parsed
            .path()
            .filter(|p| p.starts_with('/'))
            .map_or_else(|| default_path(url), ToString::to_string);

        let now = OffsetDateTime::now_utc();
        let expires = match parsed.max_age() {
            Some(max_age) if max_age <= Duration::ZERO => Some(now),
            Some(max_age) => Some(now + max_age),
            None => parsed.expires_datetime(),
        };

        let key = CookieKey { domain, path, name: parsed.name().to_string() };
        let stored = StoredCookie {
            value: parsed.value().to_string(),
            host_only,
            secure: parsed.secure().unwrap_or(false),
            expires,
        };

        let mut cookies = self.cookies.write();
        if stored.is_expired(now) {
            cookies.remove(&key);
        } else {
            cookies.insert(key, stored);
        }
    }

    /// Value of the first live cookie named `name`, percent-decoded
    pub fn get(&self, name: &str) -> Option<String> {
        let now = OffsetDateTime::now_utc();
        let cookies = self.cookies.read();
        let raw = cookies
            .iter()
            .filter(|(key, cookie)| key.name == name && !cookie.is_expired(now))
            .max_by_key(|(key, _)| key.path.len())
            .map(|(_, cookie)| cookie.value.clone())?;

        Some(urlencoding::decode(&raw).map_or(raw.clone(), |decoded| decoded.into_owned()))
    }

    /// Forget every cookie
    pub fn clear(&self) {
        self.cookies.write().clear();
    }

    pub fn len(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.cookies.read().values().filter(|cookie| !cookie.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `Cookie` header value for a request to `url`
    fn header_for(&self, url: &Url) -> Option<String> {
        let host = url.host_str()?.to_ascii_lowercase();
        let request_path = url.path();
        let is_secure = url.scheme() == "https";
        let now = OffsetDateTime::now_utc();

        let cookies = self.cookies.read();
        let mut matching: Vec<(&CookieKey, &StoredCookie)> = cookies
            .iter()
            .filter(|(key, cookie)| {
                let domain_ok = if cookie.host_only {
                    host == key.domain
                } else {
                    domain_matches(&host, &key.domain)
                };
                domain_ok
                    && path_matches(request_path, &key.path)
                    && (is_secure || !cookie.secure)
                    && !cookie.is_expired(now)
            })
            .collect();

        if matching.is_empty() {
            return None;
        }

        // Longer paths first
        matching.sort_by(|(a, _), (b, _)| b.path.len().cmp(&a.path.len()));
        Some(
            matching
                .iter()
                .map(|(key, cookie)| format!("{}={}", key.name, cookie.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl reqwest::cookie::CookieStore for SessionCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        for header in cookie_headers {
            if let Ok(value) = header.to_str() {
                self.add_cookie_str(value, url);
            }
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.header_for(url).and_then(|header| HeaderValue::from_str(&header).ok())
    }
}

impl CookieReader for SessionCookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name)
    }
}

fn domain_matches(host: &str, domain: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let domain = domain.to_ascii_lowercase();
    host == domain || host.strip_suffix(&domain).is_some_and(|prefix| prefix.ends_with('.'))
}

fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/') || request_path[cookie_path.len()..].starts_with('/'))
}

/// Directory of the request path, per RFC 6265 section 5.1.4
fn default_path(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}
