//! User profiles, including the self-service email and password changes

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{
    ApiResponse, PageRequest, Profile, ProfileEmailRequest, ProfileId, ProfilePasswordRequest,
    ProfileRequest,
};
use tracing::instrument;

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const PROFILES_PATH: &str = "/api/v1/profiles";

#[derive(Debug, Clone)]
pub struct ProfileService {
    endpoint: CrudEndpoint<Profile, ProfileRequest>,
}

impl ProfileService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, PROFILES_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Profile>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: ProfileId) -> Result<ApiResponse<Profile>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, request: &ProfileRequest) -> Result<ApiResponse<Profile>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: ProfileId,
        request: &ProfileRequest,
    ) -> Result<ApiResponse<Profile>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: ProfileId) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }

    pub async fn restore(&self, id: ProfileId) -> Result<Acknowledgement, ApiError> {
        self.endpoint.restore(id).await
    }

    /// Change the login email; the server checks `old_email` matches
    #[instrument(skip(self, request))]
    pub async fn update_email(
        &self,
        id: ProfileId,
        request: &ProfileEmailRequest,
    ) -> Result<ApiResponse<Profile>, ApiError> {
        let url = self.endpoint.path(format!("{id}/email"));
        self.endpoint.client().put(&url, request, self.endpoint.options()).await
    }

    /// Change the password; the request body is never logged
    #[instrument(skip(self, request))]
    pub async fn update_password(
        &self,
        id: ProfileId,
        request: &ProfilePasswordRequest,
    ) -> Result<ApiResponse<Profile>, ApiError> {
        let url = self.endpoint.path(format!("{id}/password"));
        self.endpoint.client().put(&url, request, self.endpoint.options()).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::{client_for, envelope};

    #[tokio::test]
    async fn email_and_password_changes_use_sub_resources() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/profiles/5/email"))
            .and(body_json(serde_json::json!({ "oldEmail": "a@x.test", "newEmail": "b@x.test" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(serde_json::json!({ "id": 5, "email": "b@x.test" }))),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/profiles/5/password"))
            .and(body_json(serde_json::json!({ "oldPassword": "old", "newPassword": "new" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({ "id": 5 }))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server).await;
        let profiles = ProfileService::new(client);

        let email = ProfileEmailRequest {
            old_email: "a@x.test".to_string(),
            new_email: "b@x.test".to_string(),
        };
        let updated = profiles.update_email(5, &email).await.unwrap().into_data().unwrap();
        assert_eq!(updated.email, "b@x.test");

        let password = ProfilePasswordRequest {
            old_password: "old".to_string(),
            new_password: "new".to_string(),
        };
        profiles.update_password(5, &password).await.unwrap();
    }

    #[tokio::test]
    async fn server_validation_message_reaches_the_caller() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/profiles"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "responseMetadata": { "responseStatusInfo": { "errMsg": "Email already exists" } }
            })))
            .mount(&server)
            .await;

        let (client, alerts) = client_for(&server).await;
        let request = ProfileRequest {
            email: "taken@x.test".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password: Some("pw".to_string()),
        };

        let err = ProfileService::new(client).create(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Email already exists");
        assert_eq!(alerts.latest().map(|a| a.message), Some("Email already exists".to_string()));
    }
}
