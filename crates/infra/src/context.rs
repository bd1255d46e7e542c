//! Application wiring
//!
//! [`ConsoleContext`] builds the whole client stack from a [`Config`]: one
//! transport with its cookie jar, the credential store selected by
//! `session.storage`, the busy flag and alert queue, the session service and
//! the API client that refreshes through it. Typed services are handed out
//! on demand and all share the one client.

use std::sync::Arc;
use std::time::Duration;

use authconsole_core::{CredentialStore, SessionContext};
use authconsole_domain::{Config, CredentialStorage};
use tracing::info;

use crate::api::{ApiClient, ApiClientConfig, ApiError, SessionRefresher};
use crate::http::HttpClient;
use crate::services::{
    AccountService, BudgetService, CategoryService, InsightsService, PermissionService,
    PlatformProfileRoleService, PlatformRolePermissionService, PlatformService, ProfileService,
    RoleService, TransactionService,
};
use crate::session::{
    AlertQueue, BusyFlag, InMemoryCredentialStore, KeychainCredentialStore, SessionEndpoints,
    SessionService,
};

const USER_AGENT: &str = concat!("authconsole/", env!("CARGO_PKG_VERSION"));

/// Everything an application needs to talk to the console APIs
pub struct ConsoleContext {
    config: Config,
    credentials: Arc<dyn CredentialStore>,
    busy: Arc<BusyFlag>,
    alerts: Arc<AlertQueue>,
    session: Arc<SessionService>,
    client: Arc<ApiClient>,
}

impl ConsoleContext {
    /// Build the client stack
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the transport cannot be built and
    /// `ApiError::Session` if the keychain cannot be opened.
    pub fn from_config(config: Config) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let credentials: Arc<dyn CredentialStore> = match config.session.storage {
            CredentialStorage::Memory => Arc::new(InMemoryCredentialStore::new()),
            CredentialStorage::Keychain => {
                Arc::new(KeychainCredentialStore::new(config.session.keychain_service.clone())?)
            }
        };
        let busy = Arc::new(BusyFlag::new());
        let alerts = Arc::new(AlertQueue::default());
        let context = SessionContext::new(credentials.clone(), busy.clone(), alerts.clone());

        let endpoints = SessionEndpoints::from_config(&config.api, &config.session);
        let session = Arc::new(SessionService::new(http.clone(), context.clone(), endpoints));
        let refresher: Arc<dyn SessionRefresher> = session.clone();
        let client = Arc::new(ApiClient::new(
            ApiClientConfig::from(&config.api),
            http,
            context,
            refresher,
        ));

        info!(
            base_url = %config.api.base_url,
            storage = %config.session.storage,
            single_flight = config.api.single_flight_refresh,
            "console context ready"
        );
        Ok(Self { config, credentials, busy, alerts, session, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Busy flag; subscribe to it to drive a progress indicator
    pub fn busy(&self) -> &Arc<BusyFlag> {
        &self.busy
    }

    /// Alerts waiting to be shown
    pub fn alerts(&self) -> &Arc<AlertQueue> {
        &self.alerts
    }

    pub fn platforms(&self) -> PlatformService {
        PlatformService::new(Arc::clone(&self.client))
    }

    pub fn roles(&self) -> RoleService {
        RoleService::new(Arc::clone(&self.client))
    }

    pub fn permissions(&self) -> PermissionService {
        PermissionService::new(Arc::clone(&self.client))
    }

    pub fn profiles(&self) -> ProfileService {
        ProfileService::new(Arc::clone(&self.client))
    }

    pub fn role_permissions(&self) -> PlatformRolePermissionService {
        PlatformRolePermissionService::new(Arc::clone(&self.client))
    }

    pub fn profile_roles(&self) -> PlatformProfileRoleService {
        PlatformProfileRoleService::new(Arc::clone(&self.client))
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(Arc::clone(&self.client))
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.client))
    }

    pub fn transactions(&self) -> TransactionService {
        TransactionService::new(Arc::clone(&self.client))
    }

    pub fn budgets(&self) -> BudgetService {
        BudgetService::new(Arc::clone(&self.client))
    }

    pub fn insights(&self) -> InsightsService {
        InsightsService::new(Arc::clone(&self.client))
    }
}

impl std::fmt::Debug for ConsoleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleContext").field("config", &self.config).finish_non_exhaustive()
    }
}
