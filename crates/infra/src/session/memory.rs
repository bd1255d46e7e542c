//! In-memory credential store

use async_trait::async_trait;
use authconsole_core::CredentialStore;
use authconsole_domain::{Credential, ProfileId, Result};
use parking_lot::RwLock;

/// Credential store that lives and dies with the process
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
    profile_id: RwLock<Option<ProfileId>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn credential(&self) -> Result<Option<Credential>> {
        Ok(self.credential.read().clone())
    }

    async fn store_credential(&self, credential: Credential) -> Result<()> {
        *self.credential.write() = Some(credential);
        Ok(())
    }

    async fn clear_credential(&self) -> Result<()> {
        *self.credential.write() = None;
        Ok(())
    }

    async fn profile_id(&self) -> Result<Option<ProfileId>> {
        Ok(*self.profile_id.read())
    }

    async fn store_profile_id(&self, profile_id: ProfileId) -> Result<()> {
        *self.profile_id.write() = Some(profile_id);
        Ok(())
    }

    async fn clear_profile_id(&self) -> Result<()> {
        *self.profile_id.write() = None;
        Ok(())
    }
}
