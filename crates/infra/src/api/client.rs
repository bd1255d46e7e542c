//! Authenticated API client
//!
//! Every call goes through one pipeline: substitute the platform id, attach
//! the bearer credential, toggle the busy indicator, dispatch, classify any
//! failure and, for a rejected credential, refresh once and replay.

use std::sync::Arc;
use std::time::Duration;

use authconsole_core::{
    resolve_url, should_refresh, substitute_platform_id, BusyGuard, HttpMethod, RequestDescriptor,
    RequestOptions, SessionContext,
};
use authconsole_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use authconsole_domain::{Alert, ApiConfig, Credential};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::auth::{NoRefresh, RefreshCoordinator, SessionRefresher};
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL joined with every relative request path
    pub base_url: String,
    /// Substituted for `{platformId}` in every request URL
    pub platform_id: String,
    /// Per-call limit covering dispatch and body read
    pub timeout: Duration,
    /// Share one refresh between concurrent 401s
    pub single_flight_refresh: bool,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            platform_id: String::new(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            single_flight_refresh: false,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            platform_id: config.platform_id.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            single_flight_refresh: config.single_flight_refresh,
        }
    }
}

/// API client with bearer injection and silent refresh
pub struct ApiClient {
    http: HttpClient,
    context: SessionContext,
    refresh: RefreshCoordinator,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// `http` should be the same transport the refresher uses so that the
    /// session cookies it relies on are shared.
    pub fn new(
        config: ApiClientConfig,
        http: HttpClient,
        context: SessionContext,
        refresher: Arc<dyn SessionRefresher>,
    ) -> Self {
        let refresh = RefreshCoordinator::new(refresher, config.single_flight_refresh);
        Self { http, context, refresh, config }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Execute a GET request with query parameters
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the call ultimately fails
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let descriptor =
            RequestDescriptor::get(url).with_query(params.iter().cloned()).with_options(options);
        self.send(descriptor).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the call ultimately fails
    pub async fn post<B, T>(
        &self,
        url: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Self::with_body(RequestDescriptor::post(url), body, options)?).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the call ultimately fails
    pub async fn put<B, T>(
        &self,
        url: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Self::with_body(RequestDescriptor::put(url), body, options)?).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the call ultimately fails
    pub async fn patch<B, T>(
        &self,
        url: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Self::with_body(RequestDescriptor::patch(url), body, options)?).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the call ultimately fails
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(RequestDescriptor::delete(url).with_options(options)).await
    }

    /// Run a prepared descriptor through the full pipeline
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the call ultimately fails. When
    /// `show_error` is set the same failure is pushed to the alert channel.
    #[instrument(skip(self, descriptor), fields(method = %descriptor.method(), url = %descriptor.url()))]
    pub async fn send<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        let url = self.resolve(descriptor.url());
        let result = self.dispatch_with_refresh(&descriptor, &url).await;

        if let Err(error) = &result {
            self.report(error, descriptor.options(), &url);
        }
        result
    }

    fn with_body<B: Serialize + ?Sized>(
        descriptor: RequestDescriptor,
        body: &B,
        options: RequestOptions,
    ) -> Result<RequestDescriptor, ApiError> {
        descriptor
            .with_json(body)
            .map(|descriptor| descriptor.with_options(options))
            .map_err(|e| ApiError::Encode(format!("Failed to serialize body: {e}")))
    }

    fn resolve(&self, url: &str) -> String {
        resolve_url(&self.config.base_url, &substitute_platform_id(url, &self.config.platform_id))
    }

    /// Dispatch, and on a first 401 refresh and replay the same descriptor
    async fn dispatch_with_refresh<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
        url: &str,
    ) -> Result<T, ApiError> {
        let mut attempt: u8 = 0;

        loop {
            let credential = self.bearer_for(descriptor.options()).await?;

            match self.dispatch(descriptor, url, credential.as_ref()).await {
                Err(error)
                    if error.status().is_some_and(|s| should_refresh(s.as_u16(), url, attempt)) =>
                {
                    info!(attempt, "credential rejected, attempting silent refresh");
                    let refreshed = self
                        .refresh
                        .refresh(self.context.credentials.as_ref(), credential.as_ref())
                        .await?;

                    if !refreshed {
                        debug!("refresh declined, propagating original failure");
                        return Err(error);
                    }
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    async fn bearer_for(&self, options: RequestOptions) -> Result<Option<Credential>, ApiError> {
        if options.no_auth {
            return Ok(None);
        }
        let credential = self.context.credentials.credential().await.map_err(ApiError::from)?;
        Ok(credential.filter(|c| !c.is_blank()))
    }

    /// One attempt: busy indicator on for exactly as long as it runs
    async fn dispatch<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
        url: &str,
        credential: Option<&Credential>,
    ) -> Result<T, ApiError> {
        let options = descriptor.options();
        let _busy = BusyGuard::engage(self.context.busy.as_ref(), options.show_spinner);

        let mut request = self
            .http
            .request(to_method(descriptor.method()), url, options.with_credentials)
            .header(ACCEPT, "application/json");
        if !descriptor.query().is_empty() {
            request = request.query(descriptor.query());
        }
        if let Some(body) = descriptor.body() {
            request = request.json(body);
        }
        if let Some(credential) = credential {
            request = request.header(AUTHORIZATION, credential.bearer());
        }

        debug!(url, bearer = credential.is_some(), "dispatching request");
        exchange(&self.http, request, self.config.timeout).await
    }

    fn report(&self, error: &ApiError, options: RequestOptions, url: &str) {
        warn!(
            url,
            status = error.status().map(|s| s.as_u16()),
            error = %error,
            detail = %error.detail(),
            "API request failed"
        );
        if options.show_error {
            self.context.alerts.push(Alert::error(error.to_string()));
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("config", &self.config).finish_non_exhaustive()
    }
}

/// Send once within `timeout` and decode a success body
///
/// Shared by the client and the session service so both classify failures
/// the same way.
pub(crate) async fn exchange<T: DeserializeOwned>(
    http: &HttpClient,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<T, ApiError> {
    let call = async {
        let response = http.send(request).await.map_err(ApiError::from)?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok::<_, ApiError>((status, body))
    };

    let (status, body) = match tokio::time::timeout(timeout, call).await {
        Ok(result) => result?,
        Err(_) => return Err(ApiError::Timeout(timeout)),
    };

    if !status.is_success() {
        return Err(ApiError::from_response(status, &body));
    }

    // 204/205 and empty bodies decode from JSON null, or an empty object for
    // envelope types whose fields all default
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT || body.is_empty() {
        return serde_json::from_value(serde_json::Value::Null)
            .or_else(|_| serde_json::from_value(serde_json::json!({})))
            .map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but response type cannot be deserialized from empty body",
                    status.as_u16()
                ))
            });
    }

    serde_json::from_slice(&body)
        .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    http: Option<HttpClient>,
    context: Option<SessionContext>,
    refresher: Option<Arc<dyn SessionRefresher>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing transport (and its cookie jar)
    pub fn http(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Set the collaborators
    pub fn context(mut self, context: SessionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the session refresher; without one a 401 is never retried
    pub fn refresher(mut self, refresher: Arc<dyn SessionRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the context is missing or the transport cannot be built
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let context =
            self.context.ok_or_else(|| ApiError::Config("Session context not set".to_string()))?;
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?,
        };
        let refresher = self.refresher.unwrap_or_else(|| Arc::new(NoRefresh));

        Ok(ApiClient::new(config, http, context, refresher))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use authconsole_core::{BusyIndicator, CredentialStore};
    use authconsole_domain::AlertSeverity;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::session::{AlertQueue, BusyFlag, InMemoryCredentialStore};

    struct Harness {
        client: ApiClient,
        credentials: Arc<InMemoryCredentialStore>,
        busy: Arc<BusyFlag>,
        alerts: Arc<AlertQueue>,
    }

    fn harness(server: &MockServer, refresher: Arc<dyn SessionRefresher>) -> Harness {
        let credentials = Arc::new(InMemoryCredentialStore::new());
        let busy = Arc::new(BusyFlag::new());
        let alerts = Arc::new(AlertQueue::default());
        let context = SessionContext::new(credentials.clone(), busy.clone(), alerts.clone());
        let config = ApiClientConfig {
            base_url: server.uri(),
            platform_id: "7".to_string(),
            ..Default::default()
        };
        let client = ApiClient::builder()
            .config(config)
            .context(context)
            .refresher(refresher)
            .build()
            .unwrap();
        Harness { client, credentials, busy, alerts }
    }

    /// Refresher that stores a fixed credential and counts calls
    struct StaticRefresher {
        store: Arc<InMemoryCredentialStore>,
        outcome: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionRefresher for StaticRefresher {
        async fn refresh(&self) -> Result<bool, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.outcome {
                self.store.store_credential(Credential::new("new-token")).await?;
            }
            Ok(self.outcome)
        }
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
    }

    #[tokio::test]
    async fn attaches_bearer_when_credential_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/roles"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "ok".to_string(),
            }))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Arc::new(NoRefresh));
        h.credentials.store_credential(Credential::new("test-token")).await.unwrap();

        let result: TestResponse =
            h.client.get("/api/v1/roles", &[], RequestOptions::default()).await.unwrap();
        assert_eq!(result.message, "ok");
    }

    #[tokio::test]
    async fn no_auth_and_missing_credential_send_no_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let h = harness(&server, Arc::new(NoRefresh));
        let _: () = h.client.get("/anonymous", &[], RequestOptions::default()).await.unwrap();

        h.credentials.store_credential(Credential::new("test-token")).await.unwrap();
        let _: () =
            h.client.get("/public", &[], RequestOptions::default().without_auth()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| !r.headers.contains_key("authorization")));
    }

    #[tokio::test]
    async fn substitutes_platform_id_and_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/platforms/7/roles"))
            .and(query_param("pageNumber", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Arc::new(NoRefresh));
        let params = vec![("pageNumber".to_string(), "2".to_string())];
        let roles: Vec<serde_json::Value> = h
            .client
            .get("/api/v1/platforms/{platformId}/roles", &params, RequestOptions::default())
            .await
            .unwrap();
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn every_verb_sends_json_body_to_substituted_url() {
        let server = MockServer::start().await;
        for verb in ["POST", "PUT", "PATCH"] {
            Mock::given(method(verb))
                .and(path("/api/v1/ba/7/items"))
                .and(body_json(serde_json::json!({ "name": "x" })))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("DELETE"))
            .and(path("/api/v1/ba/7/items"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, Arc::new(NoRefresh));
        let body = serde_json::json!({ "name": "x" });
        let url = "/api/v1/ba/{platformId}/items";
        let options = RequestOptions::default();

        let _: () = h.client.post(url, &body, options).await.unwrap();
        let _: () = h.client.put(url, &body, options).await.unwrap();
        let _: () = h.client.patch(url, &body, options).await.unwrap();
        let _: () = h.client.delete(url, options).await.unwrap();
    }

    #[tokio::test]
    async fn refresh_then_replay_returns_replay_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("Authorization", "Bearer old-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("Authorization", "Bearer new-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                message: "fresh".to_string(),
            }))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Arc::new(InMemoryCredentialStore::new());
        let refresher = Arc::new(StaticRefresher {
            store: credentials.clone(),
            outcome: true,
            calls: AtomicUsize::new(0),
        });
        let busy = Arc::new(BusyFlag::new());
        let alerts = Arc::new(AlertQueue::default());
        let client = ApiClient::builder()
            .config(ApiClientConfig { base_url: server.uri(), ..Default::default() })
            .context(SessionContext::new(credentials.clone(), busy.clone(), alerts.clone()))
            .refresher(refresher.clone())
            .build()
            .unwrap();
        credentials.store_credential(Credential::new("old-token")).await.unwrap();

        let result: TestResponse =
            client.get("/data", &[], RequestOptions::default()).await.unwrap();

        assert_eq!(result.message, "fresh");
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
        assert!(alerts.is_empty());
        assert!(!busy.is_busy());
    }

    #[tokio::test]
    async fn declined_refresh_propagates_original_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Arc::new(InMemoryCredentialStore::new());
        let refresher = Arc::new(StaticRefresher {
            store: credentials.clone(),
            outcome: false,
            calls: AtomicUsize::new(0),
        });
        let h = harness(&server, refresher.clone());

        let err =
            h.client.get::<TestResponse>("/data", &[], RequestOptions::default()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        let alert = h.alerts.latest().unwrap();
        assert_eq!(alert.severity, AlertSeverity::Error);
        assert_eq!(alert.message, "Unauthorized - Please login again");
    }

    #[tokio::test]
    async fn second_401_after_refresh_propagates_without_third_dispatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let credentials = Arc::new(InMemoryCredentialStore::new());
        let refresher = Arc::new(StaticRefresher {
            store: credentials.clone(),
            outcome: true,
            calls: AtomicUsize::new(0),
        });
        let busy = Arc::new(BusyFlag::new());
        let alerts = Arc::new(AlertQueue::default());
        let client = ApiClient::builder()
            .config(ApiClientConfig { base_url: server.uri(), ..Default::default() })
            .context(SessionContext::new(credentials.clone(), busy.clone(), alerts.clone()))
            .refresher(refresher.clone())
            .build()
            .unwrap();
        credentials.store_credential(Credential::new("old-token")).await.unwrap();

        let err =
            client.get::<TestResponse>("/data", &[], RequestOptions::default()).await.unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].headers.get("authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer new-token")
        );
        assert_eq!(alerts.len(), 1);
        assert!(!busy.is_busy());
    }

    #[tokio::test]
    async fn session_endpoints_are_never_refreshed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let credentials = Arc::new(InMemoryCredentialStore::new());
        let refresher = Arc::new(StaticRefresher {
            store: credentials.clone(),
            outcome: true,
            calls: AtomicUsize::new(0),
        });
        let h = harness(&server, refresher.clone());

        let err = h
            .client
            .post::<_, ()>(
                "/api/v1/ba/profiles/{platformId}/logout",
                &serde_json::json!({}),
                RequestOptions::silent(),
            )
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
        assert!(h.alerts.is_empty());
    }

    #[tokio::test]
    async fn structured_message_wins_over_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "responseMetadata": { "responseStatusInfo": { "errMsg": "Role already exists" } }
            })))
            .mount(&server)
            .await;

        let h = harness(&server, Arc::new(NoRefresh));
        let err = h
            .client
            .post::<_, ()>("/api/v1/roles", &serde_json::json!({}), RequestOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Role already exists");
        assert_eq!(h.alerts.latest().map(|a| a.message), Some("Role already exists".to_string()));
    }

    #[tokio::test]
    async fn busy_flag_is_raised_during_dispatch_and_cleared_after() {
        let server = MockServer::start().await;
        let h = harness(&server, Arc::new(NoRefresh));
        let busy = h.busy.clone();
        let seen_busy = Arc::new(AtomicUsize::new(0));
        let seen = seen_busy.clone();

        Mock::given(method("GET"))
            .respond_with(move |_req: &Request| -> ResponseTemplate {
                if busy.is_busy() {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
                ResponseTemplate::new(500)
            })
            .mount(&server)
            .await;

        let _ = h.client.get::<()>("/boom", &[], RequestOptions::default()).await;
        assert_eq!(seen_busy.load(Ordering::SeqCst), 1);
        assert!(!h.busy.is_busy());

        let _ = h.client.get::<()>("/boom", &[], RequestOptions::silent()).await;
        assert_eq!(seen_busy.load(Ordering::SeqCst), 1);
        assert!(!h.busy.is_busy());
    }

    #[tokio::test]
    async fn timeout_is_classified_as_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let credentials = Arc::new(InMemoryCredentialStore::new());
        let busy = Arc::new(BusyFlag::new());
        let alerts = Arc::new(AlertQueue::default());
        let client = ApiClient::builder()
            .config(ApiClientConfig {
                base_url: server.uri(),
                timeout: Duration::from_millis(50),
                ..Default::default()
            })
            .http(HttpClient::new().unwrap())
            .context(SessionContext::new(credentials, busy.clone(), alerts.clone()))
            .build()
            .unwrap();

        let err = client.get::<()>("/slow", &[], RequestOptions::default()).await.unwrap_err();

        assert!(matches!(err, ApiError::Timeout(_)));
        assert_eq!(err.to_string(), "Network error - Please check your connection");
        assert!(!busy.is_busy());
        assert_eq!(alerts.len(), 1);
    }

    #[tokio::test]
    async fn builder_requires_context() {
        assert!(matches!(ApiClient::builder().build(), Err(ApiError::Config(_))));
    }
}
