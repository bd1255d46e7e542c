//! Port interfaces for the API client's collaborators
//!
//! These traits define the boundaries between the request logic and the
//! infrastructure that stores credentials, shows progress, surfaces alerts
//! and holds cookies.

use std::sync::Arc;

use async_trait::async_trait;
use authconsole_domain::{Alert, Credential, ProfileId, Result};

/// Persistence for the bearer credential and the profile id used by refresh
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Current credential, if any
    async fn credential(&self) -> Result<Option<Credential>>;

    async fn store_credential(&self, credential: Credential) -> Result<()>;

    async fn clear_credential(&self) -> Result<()>;

    async fn profile_id(&self) -> Result<Option<ProfileId>>;

    async fn store_profile_id(&self, profile_id: ProfileId) -> Result<()>;

    async fn clear_profile_id(&self) -> Result<()>;

    /// Forget everything the session left behind
    async fn clear_session(&self) -> Result<()> {
        self.clear_credential().await?;
        self.clear_profile_id().await
    }
}

/// Process-wide busy flag
///
/// A single boolean: when calls overlap, the first one to finish clears it.
pub trait BusyIndicator: Send + Sync {
    fn show(&self);

    fn hide(&self);

    fn is_busy(&self) -> bool;
}

/// Global alert channel
pub trait AlertSink: Send + Sync {
    fn push(&self, alert: Alert);
}

/// Read access to cookies the server has set
pub trait CookieReader: Send + Sync {
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Shows the busy indicator for as long as it lives
///
/// Dropping the guard hides the indicator, so a call that errors or whose
/// future is dropped mid-flight still clears the flag.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    indicator: Option<&'a dyn BusyIndicator>,
}

impl<'a> BusyGuard<'a> {
    /// Show `indicator` when `enabled`; otherwise the guard does nothing
    pub fn engage(indicator: &'a dyn BusyIndicator, enabled: bool) -> Self {
        if enabled {
            indicator.show();
            Self { indicator: Some(indicator) }
        } else {
            Self { indicator: None }
        }
    }

    /// Hide now instead of at drop
    pub fn release(mut self) {
        if let Some(indicator) = self.indicator.take() {
            indicator.hide();
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if let Some(indicator) = self.indicator.take() {
            indicator.hide();
        }
    }
}

/// Collaborators injected into the API client at construction
#[derive(Clone)]
pub struct SessionContext {
    pub credentials: Arc<dyn CredentialStore>,
    pub busy: Arc<dyn BusyIndicator>,
    pub alerts: Arc<dyn AlertSink>,
}

impl SessionContext {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        busy: Arc<dyn BusyIndicator>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self { credentials, busy, alerts }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").field("busy", &self.busy.is_busy()).finish_non_exhaustive()
    }
}
