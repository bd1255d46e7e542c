//! Credential refresh seam
//!
//! The API client does not know how a session is renewed; it asks a
//! [`SessionRefresher`] and replays the call when the answer is `true`.

use std::sync::Arc;

use async_trait::async_trait;
use authconsole_core::CredentialStore;
use authconsole_domain::Credential;
use tokio::sync::Mutex;
use tracing::debug;

use super::errors::ApiError;

/// Trait for renewing the bearer credential
///
/// This trait allows dependency injection and testing with mock refreshers.
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// Try to obtain a new credential
    ///
    /// `Ok(true)` when a fresh credential is now stored, `Ok(false)` when the
    /// server refused (the session is over). Anything unexpected is an error.
    async fn refresh(&self) -> Result<bool, ApiError>;
}

/// Refresher for clients without a session; never renews
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRefresh;

#[async_trait]
impl SessionRefresher for NoRefresh {
    async fn refresh(&self) -> Result<bool, ApiError> {
        Ok(false)
    }
}

/// Runs refreshes for the client, optionally one at a time
///
/// Without single-flight every rejected call refreshes on its own. With it,
/// refreshes queue behind a lock and a call whose credential was already
/// rotated by an earlier refresh skips straight to the replay.
pub(crate) struct RefreshCoordinator {
    refresher: Arc<dyn SessionRefresher>,
    gate: Option<Mutex<()>>,
}

impl RefreshCoordinator {
    pub(crate) fn new(refresher: Arc<dyn SessionRefresher>, single_flight: bool) -> Self {
        Self { refresher, gate: single_flight.then(|| Mutex::new(())) }
    }

    /// Refresh after `stale` was rejected
    pub(crate) async fn refresh(
        &self,
        credentials: &dyn CredentialStore,
        stale: Option<&Credential>,
    ) -> Result<bool, ApiError> {
        let Some(gate) = &self.gate else {
            return self.refresher.refresh().await;
        };

        let _turn = gate.lock().await;
        let current = credentials.credential().await.map_err(ApiError::from)?;
        if current.is_some() && current.as_ref() != stale {
            debug!("credential rotated while waiting, skipping refresh");
            return Ok(true);
        }
        self.refresher.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use authconsole_domain::{ProfileId, Result as DomainResult};
    use parking_lot::RwLock;

    use super::*;

    #[derive(Default)]
    struct Store {
        credential: RwLock<Option<Credential>>,
    }

    #[async_trait]
    impl CredentialStore for Store {
        async fn credential(&self) -> DomainResult<Option<Credential>> {
            Ok(self.credential.read().clone())
        }

        async fn store_credential(&self, credential: Credential) -> DomainResult<()> {
            *self.credential.write() = Some(credential);
            Ok(())
        }

        async fn clear_credential(&self) -> DomainResult<()> {
            *self.credential.write() = None;
            Ok(())
        }

        async fn profile_id(&self) -> DomainResult<Option<ProfileId>> {
            Ok(Some(1))
        }

        async fn store_profile_id(&self, _profile_id: ProfileId) -> DomainResult<()> {
            Ok(())
        }

        async fn clear_profile_id(&self) -> DomainResult<()> {
            Ok(())
        }
    }

    /// Rotates the credential in the shared store on every call
    struct Rotating {
        store: Arc<Store>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionRefresher for Rotating {
        async fn refresh(&self) -> Result<bool, ApiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.store.store_credential(Credential::new(format!("fresh-{call}"))).await?;
            Ok(true)
        }
    }

    #[tokio::test]
    async fn no_refresh_always_declines() {
        assert!(!NoRefresh.refresh().await.unwrap());
    }

    #[tokio::test]
    async fn independent_mode_refreshes_every_time() {
        let store = Arc::new(Store::default());
        let rotating = Arc::new(Rotating { store: store.clone(), calls: AtomicUsize::new(0) });
        let coordinator = RefreshCoordinator::new(rotating.clone(), false);

        let stale = Credential::new("stale");
        assert!(coordinator.refresh(store.as_ref(), Some(&stale)).await.unwrap());
        assert!(coordinator.refresh(store.as_ref(), Some(&stale)).await.unwrap());

        assert_eq!(rotating.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn single_flight_skips_refresh_when_already_rotated() {
        let store = Arc::new(Store::default());
        store.store_credential(Credential::new("stale")).await.unwrap();
        let rotating = Arc::new(Rotating { store: store.clone(), calls: AtomicUsize::new(0) });
        let coordinator = RefreshCoordinator::new(rotating.clone(), true);

        let stale = Credential::new("stale");
        let (first, second) = tokio::join!(
            coordinator.refresh(store.as_ref(), Some(&stale)),
            coordinator.refresh(store.as_ref(), Some(&stale)),
        );

        assert!(first.unwrap());
        assert!(second.unwrap());
        assert_eq!(rotating.calls.load(Ordering::SeqCst), 1);
    }
}
