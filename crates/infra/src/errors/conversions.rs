//! Conversions from external infrastructure errors into domain errors.

use authconsole_domain::ConsoleError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ConsoleError);

impl From<InfraError> for ConsoleError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ConsoleError> for InfraError {
    fn from(value: ConsoleError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoConsoleError {
    fn into_console(self) -> ConsoleError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → ConsoleError */
/* -------------------------------------------------------------------------- */

impl IntoConsoleError for KeyringError {
    fn into_console(self) -> ConsoleError {
        let description = self.to_string();

        match self {
            KeyringError::NoEntry => ConsoleError::NotFound("keychain entry not found".into()),
            KeyringError::BadEncoding(_) => {
                ConsoleError::Storage("credential in keychain is not valid UTF-8".into())
            }
            KeyringError::TooLong(name, limit) => ConsoleError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            KeyringError::Invalid(attr, reason) => {
                ConsoleError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            KeyringError::Ambiguous(entries) => ConsoleError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            KeyringError::PlatformFailure(err) => {
                ConsoleError::Storage(format!("keychain platform error: {err}"))
            }
            KeyringError::NoStorageAccess(err) => {
                ConsoleError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => ConsoleError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_console())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ConsoleError */
/* -------------------------------------------------------------------------- */

impl IntoConsoleError for HttpError {
    fn into_console(self) -> ConsoleError {
        if self.is_timeout() {
            return ConsoleError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ConsoleError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return ConsoleError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        ConsoleError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_console())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn keyring_no_entry_maps_to_not_found() {
        let mapped: ConsoleError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            ConsoleError::NotFound(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn keyring_bad_encoding_maps_to_storage() {
        let mapped: ConsoleError = InfraError::from(KeyringError::BadEncoding(vec![0xff])).into();
        assert!(matches!(mapped, ConsoleError::Storage(_)));
    }

    #[tokio::test]
    async fn refused_connection_maps_to_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: ConsoleError = InfraError::from(error).into();
        assert!(matches!(mapped, ConsoleError::Network(_)));
    }

    #[tokio::test]
    async fn status_errors_are_not_reinterpreted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::FORBIDDEN))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: ConsoleError = InfraError::from(error).into();
        assert!(matches!(mapped, ConsoleError::Network(_)));
    }
}
