//! Keychain-backed credential store
//!
//! The credential and profile id live in the platform keychain so a session
//! survives restarts. Reads go through an in-memory cache; the keychain is
//! only consulted on first access and after [`KeychainCredentialStore::reload`].

use async_trait::async_trait;
use authconsole_core::CredentialStore;
use authconsole_domain::constants::{KEYCHAIN_CREDENTIAL_ACCOUNT, KEYCHAIN_PROFILE_ACCOUNT};
use authconsole_domain::{ConsoleError, Credential, ProfileId, Result};
use keyring::Entry;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::errors::InfraError;

#[derive(Debug, Clone)]
enum Cached<T> {
    Unloaded,
    Loaded(Option<T>),
}

/// Credential store using the system keyring
pub struct KeychainCredentialStore {
    service: String,
    credential_entry: Entry,
    profile_entry: Entry,
    credential: RwLock<Cached<Credential>>,
    profile_id: RwLock<Cached<ProfileId>>,
}

impl KeychainCredentialStore {
    /// Open the entries for `service`
    ///
    /// # Errors
    /// Returns `ConsoleError::Storage` if the keychain cannot be accessed.
    pub fn new(service: impl Into<String>) -> Result<Self> {
        let service = service.into();
        let credential_entry = open_entry(&service, KEYCHAIN_CREDENTIAL_ACCOUNT)?;
        let profile_entry = open_entry(&service, KEYCHAIN_PROFILE_ACCOUNT)?;

        Ok(Self {
            service,
            credential_entry,
            profile_entry,
            credential: RwLock::new(Cached::Unloaded),
            profile_id: RwLock::new(Cached::Unloaded),
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Drop the cache so the next read goes to the keychain
    pub fn reload(&self) {
        *self.credential.write() = Cached::Unloaded;
        *self.profile_id.write() = Cached::Unloaded;
    }

    fn read_secret(entry: &Entry) -> Result<Option<String>> {
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn delete_secret(entry: &Entry) -> Result<()> {
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

fn open_entry(service: &str, account: &str) -> Result<Entry> {
    Entry::new(service, account)
        .map_err(|e| ConsoleError::Storage(format!("Failed to access keyring: {e}")))
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn credential(&self) -> Result<Option<Credential>> {
        if let Cached::Loaded(credential) = &*self.credential.read() {
            return Ok(credential.clone());
        }

        let credential = Self::read_secret(&self.credential_entry)?.map(Credential::new);
        debug!(
            service = %self.service,
            present = credential.is_some(),
            "loaded credential from keychain"
        );
        *self.credential.write() = Cached::Loaded(credential.clone());
        Ok(credential)
    }

    async fn store_credential(&self, credential: Credential) -> Result<()> {
        self.credential_entry
            .set_password(credential.expose())
            .map_err(|e| ConsoleError::from(InfraError::from(e)))?;
        *self.credential.write() = Cached::Loaded(Some(credential));
        Ok(())
    }

    async fn clear_credential(&self) -> Result<()> {
        *self.credential.write() = Cached::Loaded(None);
        Self::delete_secret(&self.credential_entry)
    }

    async fn profile_id(&self) -> Result<Option<ProfileId>> {
        if let Cached::Loaded(profile_id) = &*self.profile_id.read() {
            return Ok(*profile_id);
        }

        let profile_id = match Self::read_secret(&self.profile_entry)? {
            Some(raw) => match raw.trim().parse::<ProfileId>() {
                Ok(id) => Some(id),
                Err(err) => {
                    warn!(
                        service = %self.service,
                        error = %err,
                        "ignoring malformed profile id in keychain"
                    );
                    None
                }
            },
            None => None,
        };
        *self.profile_id.write() = Cached::Loaded(profile_id);
        Ok(profile_id)
    }

    async fn store_profile_id(&self, profile_id: ProfileId) -> Result<()> {
        self.profile_entry
            .set_password(&profile_id.to_string())
            .map_err(|e| ConsoleError::from(InfraError::from(e)))?;
        *self.profile_id.write() = Cached::Loaded(Some(profile_id));
        Ok(())
    }

    async fn clear_profile_id(&self) -> Result<()> {
        *self.profile_id.write() = Cached::Loaded(None);
        Self::delete_secret(&self.profile_entry)
    }
}

impl std::fmt::Debug for KeychainCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainCredentialStore")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_store() -> KeychainCredentialStore {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeychainCredentialStore::new("com.authconsole.test").unwrap()
    }

    #[tokio::test]
    async fn empty_keychain_reads_as_signed_out() {
        let store = mock_store();
        assert!(store.credential().await.unwrap().is_none());
        assert!(store.profile_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn values_survive_a_cache_reload() {
        let store = mock_store();
        store.store_credential(Credential::new("kc-token")).await.unwrap();
        store.store_profile_id(42).await.unwrap();

        store.reload();

        let credential = store.credential().await.unwrap();
        assert_eq!(credential.as_ref().map(Credential::expose), Some("kc-token"));
        assert_eq!(store.profile_id().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn clearing_twice_is_fine() {
        let store = mock_store();
        store.store_credential(Credential::new("kc-token")).await.unwrap();

        store.clear_session().await.unwrap();
        store.clear_session().await.unwrap();

        store.reload();
        assert!(store.credential().await.unwrap().is_none());
    }
}
