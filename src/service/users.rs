//! User administration within an organization.
//!
//! Only privileged roles manage accounts. The active-user quota is enforced
//! here, both at creation and when reactivating an account, so an
//! organization can never exceed its `max_users` through this service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::access::authorize_org_scope;
use crate::auth::password::{hash_password_with_cost, DEFAULT_HASH_COST};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{CreateUserInput, Principal, UpdateUserInput, User};
use crate::store::DirectoryStore;

pub struct UserService {
    directory: Arc<dyn DirectoryStore>,
    hash_cost: u32,
}

impl UserService {
    pub fn new(directory: Arc<dyn DirectoryStore>) -> Self {
        Self {
            directory,
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    pub fn with_config(directory: Arc<dyn DirectoryStore>, config: &Config) -> Self {
        Self {
            directory,
            hash_cost: config.hash_cost,
        }
    }

    /// Lists the users of the caller's organization. Privileged roles only.
    pub async fn list(&self, principal: &Principal) -> Result<Vec<User>, AppError> {
        if !principal.role.is_privileged() {
            return Err(AppError::Forbidden("Insufficient permissions".into()));
        }
        self.directory
            .find_users_in_org(principal.organization_id)
            .await
    }

    /// Creates a user in the caller's organization. Privileged roles only.
    /// The password is hashed here; the plaintext never reaches the store.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateUserInput,
    ) -> Result<User, AppError> {
        if !principal.role.is_privileged() {
            return Err(AppError::Forbidden("Insufficient permissions".into()));
        }
        input.validate()?;

        let organization = self
            .directory
            .find_org_by_id(principal.organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;
        if !organization.active {
            return Err(AppError::Forbidden("Organization is deactivated".into()));
        }

        let active = input.active.unwrap_or(true);
        if active {
            self.ensure_quota(principal.organization_id, organization.max_users, None)
                .await?;
        }

        if self
            .directory
            .find_user_by_login(&input.username)
            .await?
            .is_some()
            || self
                .directory
                .find_user_by_login(&input.email)
                .await?
                .is_some()
        {
            return Err(AppError::Conflict("Username or email already in use".into()));
        }

        let password_hash = hash_password_with_cost(&input.password, self.hash_cost)?;
        let user = User::new(input, principal.organization_id, password_hash, active);
        self.directory.create_user(user).await
    }

    /// Updates a user of the caller's organization. Privileged roles only;
    /// a target in another organization is reported as absent.
    pub async fn update(
        &self,
        principal: &Principal,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, AppError> {
        if !principal.role.is_privileged() {
            return Err(AppError::Forbidden("Insufficient permissions".into()));
        }
        input.validate()?;

        let mut user = self
            .directory
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        authorize_org_scope(principal, user.organization_id, "User")?;

        let organization = self
            .directory
            .find_org_by_id(principal.organization_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;
        if !organization.active {
            return Err(AppError::Forbidden("Organization is deactivated".into()));
        }

        // Reactivation re-checks the quota, excluding the user itself
        if input.active == Some(true) && !user.active {
            self.ensure_quota(
                principal.organization_id,
                organization.max_users,
                Some(user.id),
            )
            .await?;
        }

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(role) = input.role {
            user.role = role;
            if !role.is_guest() {
                user.visible_topic_ids.clear();
            }
        }
        if let Some(active) = input.active {
            if user.active && !active {
                log::info!("user {} deactivated by {}", user.id, principal.user_id);
            }
            user.active = active;
        }
        if let Some(password) = input.password {
            user.password_hash = hash_password_with_cost(&password, self.hash_cost)?;
        }
        if let Some(topics) = input.visible_topic_ids {
            if user.role.is_guest() {
                user.visible_topic_ids = topics;
            }
        }
        user.updated_at = Utc::now();

        self.directory.update_user(user).await
    }

    async fn ensure_quota(
        &self,
        organization_id: Uuid,
        max_users: u32,
        exclude: Option<Uuid>,
    ) -> Result<(), AppError> {
        let users = self.directory.find_users_in_org(organization_id).await?;
        let active_count = users
            .iter()
            .filter(|u| u.active && Some(u.id) != exclude)
            .count();

        if active_count >= max_users as usize {
            return Err(AppError::Conflict(format!(
                "Maximum active user limit ({}) reached",
                max_users
            )));
        }
        Ok(())
    }
}
