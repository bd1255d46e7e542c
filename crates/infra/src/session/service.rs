//! Session lifecycle: login, silent refresh, logout
//!
//! Session endpoints talk to the transport directly rather than through the
//! [`ApiClient`](crate::api::ApiClient): a rejected refresh must never
//! trigger another refresh, and the client itself depends on this service.

use std::time::Duration;

use async_trait::async_trait;
use authconsole_core::{resolve_url, substitute_platform_id, BusyGuard, CookieReader, SessionContext};
use authconsole_domain::{
    Alert, ApiConfig, ApiResponse, AuthToken, LoginRequest, Profile, ProfileId, RefreshRequest,
    SessionConfig,
};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use super::{LogoutReason, SessionEvent};
use crate::api::client::exchange;
use crate::api::{ApiError, SessionRefresher};
use crate::http::HttpClient;

const EVENT_CAPACITY: usize = 16;

/// Resolved session endpoint settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEndpoints {
    pub base_url: String,
    pub platform_id: String,
    pub login_path: String,
    pub refresh_path: String,
    pub logout_path: String,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    pub timeout: Duration,
}

impl SessionEndpoints {
    pub fn from_config(api: &ApiConfig, session: &SessionConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            platform_id: api.platform_id.clone(),
            login_path: session.login_path.clone(),
            refresh_path: session.refresh_path.clone(),
            logout_path: session.logout_path.clone(),
            csrf_cookie_name: session.csrf_cookie_name.clone(),
            csrf_header_name: session.csrf_header_name.clone(),
            timeout: Duration::from_secs(api.timeout_seconds),
        }
    }

    fn url(&self, path: &str) -> String {
        resolve_url(&self.base_url, &substitute_platform_id(path, &self.platform_id))
    }
}

/// Owns the credential lifecycle
pub struct SessionService {
    http: HttpClient,
    context: SessionContext,
    endpoints: SessionEndpoints,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionService {
    /// `http` must be the transport the API client uses, so both see the
    /// same session cookies
    pub fn new(http: HttpClient, context: SessionContext, endpoints: SessionEndpoints) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { http, context, endpoints, events }
    }

    /// Session transitions (login, refresh, logout)
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// A credential is stored
    ///
    /// # Errors
    /// Returns `ApiError::Session` if the credential store cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        let credential = self.context.credentials.credential().await.map_err(ApiError::from)?;
        Ok(credential.is_some_and(|c| !c.is_blank()))
    }

    /// Exchange username and password for a credential
    ///
    /// Stores the credential and, when the server includes the profile, its
    /// id for later refreshes. Failures are pushed to the alert channel.
    ///
    /// # Errors
    /// Returns the classified failure of the login call, or a storage error.
    #[instrument(skip(self, username, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<Profile>, ApiError> {
        let url = self.endpoints.url(&self.endpoints.login_path);
        let body = LoginRequest { username: username.to_string(), password: password.to_string() };

        let busy = BusyGuard::engage(self.context.busy.as_ref(), true);
        let request = self
            .http
            .request(Method::POST, &url, true)
            .header(ACCEPT, "application/json")
            .json(&body);
        let result = exchange::<ApiResponse<AuthToken>>(&self.http, request, self.endpoints.timeout)
            .await
            .and_then(|envelope| {
                envelope
                    .into_data()
                    .filter(|auth| !auth.token.is_blank())
                    .ok_or_else(|| ApiError::Decode("login response carried no credential".into()))
            });
        busy.release();

        let auth = match result {
            Ok(auth) => auth,
            Err(error) => {
                warn!(error = %error, detail = %error.detail(), "login failed");
                self.context.alerts.push(Alert::error(error.to_string()));
                return Err(error);
            }
        };

        let profile_id = auth.profile.as_ref().and_then(|p| p.id);
        self.context.credentials.store_credential(auth.token).await.map_err(ApiError::from)?;
        match profile_id {
            Some(id) => {
                self.context.credentials.store_profile_id(id).await.map_err(ApiError::from)?;
            }
            None => warn!("login response has no profile id; silent refresh will be unavailable"),
        }

        info!(profile_id, "session started");
        let _ = self.events.send(SessionEvent::LoggedIn { profile_id });
        Ok(auth.profile)
    }

    /// Renew the credential using the refresh cookie
    ///
    /// Returns `Ok(true)` when a new credential is stored. A 4xx answer
    /// means the session is over: credential, profile id and cookies are
    /// cleared, a logout event is sent and `Ok(false)` is returned.
    ///
    /// # Errors
    /// Server errors, transport failures and malformed responses propagate.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<bool, ApiError> {
        let Some(profile_id) = self.stored_profile_id().await? else {
            warn!("no profile id stored, cannot refresh session");
            return Ok(false);
        };

        let url = self.endpoints.url(&self.endpoints.refresh_path);
        let mut request = self
            .http
            .request(Method::POST, &url, true)
            .header(ACCEPT, "application/json")
            .json(&RefreshRequest { profile_id });
        match self.http.cookies().cookie(&self.endpoints.csrf_cookie_name) {
            Some(token) => {
                request = request.header(self.endpoints.csrf_header_name.as_str(), token);
            }
            None => debug!(cookie = %self.endpoints.csrf_cookie_name, "anti-forgery cookie missing"),
        }

        match exchange::<ApiResponse<AuthToken>>(&self.http, request, self.endpoints.timeout).await {
            Ok(envelope) => {
                let auth = envelope
                    .into_data()
                    .filter(|auth| !auth.token.is_blank())
                    .ok_or_else(|| ApiError::Decode("refresh response carried no credential".into()))?;
                self.context.credentials.store_credential(auth.token).await.map_err(ApiError::from)?;
                info!(profile_id, "credential refreshed");
                let _ = self.events.send(SessionEvent::Refreshed);
                Ok(true)
            }
            Err(error) if error.status().is_some_and(|s| s.is_client_error()) => {
                info!(status = error.status().map(|s| s.as_u16()), "refresh rejected, ending session");
                self.end_session(LogoutReason::RefreshRejected).await?;
                Ok(false)
            }
            Err(error) => {
                warn!(error = %error, detail = %error.detail(), "refresh failed unexpectedly");
                Err(error)
            }
        }
    }

    /// Tell the server, then forget the session whatever it answered
    ///
    /// # Errors
    /// Only local storage failures are returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoints.url(&self.endpoints.logout_path);
        let mut request = self.http.request(Method::POST, &url, true).header(ACCEPT, "application/json");

        match self.context.credentials.credential().await {
            Ok(Some(credential)) if !credential.is_blank() => {
                request = request.header(AUTHORIZATION, credential.bearer());
            }
            Ok(_) => {}
            Err(error) => debug!(error = %error, "could not read credential for logout"),
        }

        if let Err(error) =
            exchange::<serde_json::Value>(&self.http, request, self.endpoints.timeout).await
        {
            warn!(error = %error, detail = %error.detail(), "logout request failed, clearing local session anyway");
        }

        self.end_session(LogoutReason::UserRequested).await
    }

    async fn stored_profile_id(&self) -> Result<Option<ProfileId>, ApiError> {
        self.context.credentials.profile_id().await.map_err(ApiError::from)
    }

    async fn end_session(&self, reason: LogoutReason) -> Result<(), ApiError> {
        self.http.cookies().clear();
        let cleared = self.context.credentials.clear_session().await.map_err(ApiError::from);
        info!(?reason, "session ended");
        let _ = self.events.send(SessionEvent::LoggedOut { reason });
        cleared
    }
}

#[async_trait]
impl SessionRefresher for SessionService {
    async fn refresh(&self) -> Result<bool, ApiError> {
        Self::refresh(self).await
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService").field("endpoints", &self.endpoints).finish_non_exhaustive()
    }
}
