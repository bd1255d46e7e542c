//! Request descriptor
//!
//! A descriptor captures everything needed to dispatch one logical call:
//! method, URL template, query, JSON body and the behavior flags. It is
//! built once and never mutated, so a replay after a credential refresh
//! sends exactly what the first attempt sent.

use authconsole_domain::constants::PLATFORM_ID_PLACEHOLDER;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call behavior flags
///
/// Defaults: spinner on, alerts on, bearer attached, no cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestOptions {
    /// Toggle the busy indicator around the call
    pub show_spinner: bool,
    /// Push the classified failure to the alert channel
    pub show_error: bool,
    /// Skip the `Authorization` header
    pub no_auth: bool,
    /// Send and accept cookies for this call
    pub with_credentials: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { show_spinner: true, show_error: true, no_auth: false, with_credentials: false }
    }
}

impl RequestOptions {
    /// No spinner and no alert; failures still propagate
    pub fn silent() -> Self {
        Self { show_spinner: false, show_error: false, ..Self::default() }
    }

    /// Flags for the session endpoints: unauthenticated, cookie-carrying
    pub fn session() -> Self {
        Self { no_auth: true, with_credentials: true, ..Self::default() }
    }

    #[must_use]
    pub const fn spinner(mut self, enabled: bool) -> Self {
        self.show_spinner = enabled;
        self
    }

    #[must_use]
    pub const fn errors(mut self, enabled: bool) -> Self {
        self.show_error = enabled;
        self
    }

    #[must_use]
    pub const fn without_auth(mut self) -> Self {
        self.no_auth = true;
        self
    }

    #[must_use]
    pub const fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }
}

/// One logical call, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    options: RequestOptions,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    #[must_use]
    pub fn with_query(mut self, query: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(query);
        self
    }

    /// Attach a JSON body
    ///
    /// # Errors
    /// Returns the serializer error if `body` cannot be represented as JSON.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// URL as given, placeholder not yet substituted
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub const fn options(&self) -> RequestOptions {
        self.options
    }
}

/// Replace the `{platformId}` placeholder with the configured application id
pub fn substitute_platform_id(url: &str, platform_id: &str) -> String {
    url.replace(PLATFORM_ID_PLACEHOLDER, platform_id)
}

/// Join `path` onto `base_url`
///
/// Absolute `http://` and `https://` URLs are returned unchanged.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    let has_scheme = |scheme: &str| {
        path.get(..scheme.len()).is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    };
    if has_scheme("http://") || has_scheme("https://") {
        return path.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    format!("{base}/{}", path.trim_start_matches('/'))
}
