use std::sync::Arc;
use std::time::Duration;

use authconsole_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use authconsole_domain::ConsoleError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use super::cookies::SessionCookieJar;
use crate::errors::InfraError;

/// HTTP transport with an opt-in cookie jar.
///
/// Two `reqwest` clients share one connection configuration: the plain one
/// never sends or stores cookies, the credentialed one goes through the
/// session cookie jar. Each request is sent exactly once; replays are the
/// caller's decision.
#[derive(Clone)]
pub struct HttpClient {
    plain: ReqwestClient,
    credentialed: ReqwestClient,
    cookies: Arc<SessionCookieJar>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, ConsoleError> {
        Self::builder().build()
    }

    /// Create a request builder; `with_credentials` selects the cookie-carrying
    /// client.
    pub fn request<U>(&self, method: Method, url: U, with_credentials: bool) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        if with_credentials {
            self.credentialed.request(method, url)
        } else {
            self.plain.request(method, url)
        }
    }

    /// Send the request once on the client that created it.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ConsoleError> {
        let (client, request) = builder.build_split();
        let request = request.map_err(|err| ConsoleError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    /// Jar holding cookies set on credentialed responses.
    pub fn cookies(&self) -> &Arc<SessionCookieJar> {
        &self.cookies
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient").field("cookies", &self.cookies.len()).finish_non_exhaustive()
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    cookies: Option<Arc<SessionCookieJar>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
            cookies: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Share an existing jar instead of starting empty.
    pub fn cookie_jar(mut self, jar: Arc<SessionCookieJar>) -> Self {
        self.cookies = Some(jar);
        self
    }

    pub fn build(self) -> Result<HttpClient, ConsoleError> {
        let cookies = self.cookies.unwrap_or_default();

        let configure = |mut builder: reqwest::ClientBuilder| {
            builder = builder.timeout(self.timeout).no_proxy();
            if let Some(agent) = &self.user_agent {
                builder = builder.user_agent(agent.clone());
            }
            if let Some(headers) = &self.default_headers {
                builder = builder.default_headers(headers.clone());
            }
            builder
        };

        let plain = configure(ReqwestClient::builder())
            .build()
            .map_err(|err| ConsoleError::from(InfraError::from(err)))?;
        let credentialed = configure(ReqwestClient::builder())
            .cookie_provider(Arc::clone(&cookies))
            .build()
            .map_err(|err| ConsoleError::from(InfraError::from(err)))?;

        Ok(HttpClient { plain, credentialed, cookies })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::StatusCode;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn sends_exactly_once_even_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response =
            client.send(client.request(Method::GET, server.uri(), false)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn credentialed_requests_store_and_replay_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "refresh=r1; Path=/"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("cookie", "refresh=r1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let login = format!("{}/login", server.uri());
        client.send(client.request(Method::POST, &login, true)).await.unwrap();
        assert_eq!(client.cookies().get("refresh").as_deref(), Some("r1"));

        let me = format!("{}/me", server.uri());
        let response = client.send(client.request(Method::GET, &me, true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn plain_requests_ignore_the_jar() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "refresh=r1; Path=/"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        client.send(client.request(Method::POST, server.uri(), false)).await.unwrap();

        assert!(client.cookies().is_empty());
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = HttpClient::new().unwrap();
        let request = client.request(Method::GET, format!("http://{addr}"), false);
        let result = client.send(request).await;

        assert!(matches!(result, Err(ConsoleError::Network(_))));
    }
}
