//! Organization administration.
//!
//! Reads and updates are tenant-scoped like everything else. Activation and
//! deactivation are different on purpose: they are an ADMIN capability that
//! reaches across organizations, the one place in the crate where a
//! principal may act outside its own tenant.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join;
use uuid::Uuid;
use validator::Validate;

use crate::access::authorize_org_scope;
use crate::error::AppError;
use crate::models::{Organization, OrganizationStats, Principal, UpdateOrganizationInput};
use crate::store::{DirectoryStore, TaskStore};

const ORG_NOT_FOUND: &str = "Organization not found";

pub struct OrganizationService {
    tasks: Arc<dyn TaskStore>,
    directory: Arc<dyn DirectoryStore>,
}

impl OrganizationService {
    pub fn new(tasks: Arc<dyn TaskStore>, directory: Arc<dyn DirectoryStore>) -> Self {
        Self { tasks, directory }
    }

    /// Reads an organization record. Any authenticated principal, own
    /// organization only.
    pub async fn get(
        &self,
        principal: &Principal,
        organization_id: Uuid,
    ) -> Result<Organization, AppError> {
        authorize_org_scope(principal, organization_id, "Organization")?;
        self.fetch(organization_id).await
    }

    /// Updates name and user quota. Privileged roles, own organization only.
    /// The slug is immutable and has no corresponding patch field.
    pub async fn update(
        &self,
        principal: &Principal,
        organization_id: Uuid,
        input: UpdateOrganizationInput,
    ) -> Result<Organization, AppError> {
        authorize_org_scope(principal, organization_id, "Organization")?;
        if !principal.role.is_privileged() {
            return Err(AppError::Forbidden("Insufficient permissions".into()));
        }
        input.validate()?;

        let mut organization = self.fetch(organization_id).await?;
        if !organization.active {
            return Err(AppError::Forbidden("Organization is deactivated".into()));
        }

        if let Some(name) = input.name {
            organization.name = name;
        }
        if let Some(max_users) = input.max_users {
            organization.max_users = max_users;
        }
        organization.updated_at = Utc::now();

        self.directory.update_org(organization).await
    }

    /// Usage statistics. Same scoping as `get`.
    pub async fn stats(
        &self,
        principal: &Principal,
        organization_id: Uuid,
    ) -> Result<OrganizationStats, AppError> {
        authorize_org_scope(principal, organization_id, "Organization")?;
        self.fetch(organization_id).await?;

        let (users, tasks) = try_join(
            self.directory.find_users_in_org(organization_id),
            self.tasks.find_all_in_org(organization_id),
        )
        .await?;

        Ok(OrganizationStats {
            user_count: users.len(),
            active_user_count: users.iter().filter(|u| u.active).count(),
            task_count: tasks.len(),
            active_task_count: tasks.iter().filter(|t| t.status.is_active()).count(),
            completed_task_count: tasks.iter().filter(|t| !t.status.is_active()).count(),
        })
    }

    /// Reactivates an organization. ADMIN only; works across organizations.
    pub async fn activate(
        &self,
        principal: &Principal,
        organization_id: Uuid,
    ) -> Result<Organization, AppError> {
        let organization = self.set_active(principal, organization_id, true).await?;
        log::info!(
            "organization {} activated by {}",
            organization.id,
            principal.user_id
        );
        Ok(organization)
    }

    /// Deactivates an organization, blocking further mutations by its
    /// members. ADMIN only; works across organizations.
    pub async fn deactivate(
        &self,
        principal: &Principal,
        organization_id: Uuid,
    ) -> Result<Organization, AppError> {
        let organization = self.set_active(principal, organization_id, false).await?;
        log::warn!(
            "organization {} deactivated by {}",
            organization.id,
            principal.user_id
        );
        Ok(organization)
    }

    async fn set_active(
        &self,
        principal: &Principal,
        organization_id: Uuid,
        active: bool,
    ) -> Result<Organization, AppError> {
        if !principal.role.is_admin() {
            return Err(AppError::Forbidden("Admin access required".into()));
        }

        let mut organization = self.fetch(organization_id).await?;
        organization.active = active;
        organization.updated_at = Utc::now();
        self.directory.update_org(organization).await
    }

    async fn fetch(&self, organization_id: Uuid) -> Result<Organization, AppError> {
        self.directory
            .find_org_by_id(organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ORG_NOT_FOUND.into()))
    }
}
