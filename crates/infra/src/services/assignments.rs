//! The two many-to-many relationships: permissions granted to a role on a
//! platform, and roles granted to a profile on a platform
//!
//! Both follow the same shape: list, assign one, unassign one, plus a
//! `reconcile` that turns a desired id set into the assign/unassign calls.

use std::sync::Arc;

use authconsole_core::{diff, AssignmentDiff, RequestOptions};
use authconsole_domain::{
    ApiResponse, PageRequest, PlatformProfileRole, PlatformProfileRoleRequest,
    PlatformRolePermission, PlatformRolePermissionRequest, ProfileId,
};
use tracing::{info, instrument};

use super::Acknowledgement;
use crate::api::{ApiClient, ApiError};

pub const PRP_PATH: &str = "/api/v1/prp";
pub const PPR_PATH: &str = "/api/v1/ppr";

/// Platform-role-permission assignments
#[derive(Debug, Clone)]
pub struct PlatformRolePermissionService {
    client: Arc<ApiClient>,
    options: RequestOptions,
}

impl PlatformRolePermissionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, options: RequestOptions::default() }
    }

    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<ApiResponse<Vec<PlatformRolePermission>>, ApiError> {
        self.client.get(PRP_PATH, &page.to_query(), self.options).await
    }

    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        request: &PlatformRolePermissionRequest,
    ) -> Result<ApiResponse<PlatformRolePermission>, ApiError> {
        self.client.post(PRP_PATH, request, self.options).await
    }

    #[instrument(skip(self))]
    pub async fn unassign(
        &self,
        platform_id: i64,
        role_id: i64,
        permission_id: i64,
    ) -> Result<Acknowledgement, ApiError> {
        let url = format!(
            "{PRP_PATH}/platform/{platform_id}/role/{role_id}/permission/{permission_id}"
        );
        self.client.delete(&url, self.options).await
    }

    /// Bring the role's permissions on `platform_id` from `current` to
    /// `desired`
    ///
    /// Assigns run before unassigns; the first failure stops the sequence.
    ///
    /// # Errors
    /// The first failed assign or unassign call.
    #[instrument(skip(self, current, desired))]
    pub async fn reconcile(
        &self,
        platform_id: i64,
        role_id: i64,
        current: &[i64],
        desired: &[i64],
    ) -> Result<AssignmentDiff<i64>, ApiError> {
        let changes = diff(current, desired);
        for &permission_id in &changes.to_assign {
            let request = PlatformRolePermissionRequest { platform_id, role_id, permission_id };
            self.assign(&request).await?;
        }
        for &permission_id in &changes.to_unassign {
            self.unassign(platform_id, role_id, permission_id).await?;
        }
        info!(
            assigned = changes.to_assign.len(),
            unassigned = changes.to_unassign.len(),
            "role permissions reconciled"
        );
        Ok(changes)
    }
}

/// Platform-profile-role assignments
#[derive(Debug, Clone)]
pub struct PlatformProfileRoleService {
    client: Arc<ApiClient>,
    options: RequestOptions,
}

impl PlatformProfileRoleService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, options: RequestOptions::default() }
    }

    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<ApiResponse<Vec<PlatformProfileRole>>, ApiError> {
        self.client.get(PPR_PATH, &page.to_query(), self.options).await
    }

    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        request: &PlatformProfileRoleRequest,
    ) -> Result<ApiResponse<PlatformProfileRole>, ApiError> {
        self.client.post(PPR_PATH, request, self.options).await
    }

    #[instrument(skip(self))]
    pub async fn unassign(
        &self,
        platform_id: i64,
        profile_id: ProfileId,
        role_id: i64,
    ) -> Result<Acknowledgement, ApiError> {
        let url = format!("{PPR_PATH}/platform/{platform_id}/profile/{profile_id}/role/{role_id}");
        self.client.delete(&url, self.options).await
    }

    /// Bring the profile's roles on `platform_id` from `current` to `desired`
    ///
    /// # Errors
    /// The first failed assign or unassign call.
    #[instrument(skip(self, current, desired))]
    pub async fn reconcile(
        &self,
        platform_id: i64,
        profile_id: ProfileId,
        current: &[i64],
        desired: &[i64],
    ) -> Result<AssignmentDiff<i64>, ApiError> {
        let changes = diff(current, desired);
        for &role_id in &changes.to_assign {
            let request = PlatformProfileRoleRequest { platform_id, profile_id, role_id };
            self.assign(&request).await?;
        }
        for &role_id in &changes.to_unassign {
            self.unassign(platform_id, profile_id, role_id).await?;
        }
        info!(
            assigned = changes.to_assign.len(),
            unassigned = changes.to_unassign.len(),
            "profile roles reconciled"
        );
        Ok(changes)
    }
}
