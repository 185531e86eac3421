//! Persistence contracts consumed by the services.
//!
//! The core performs no I/O of its own; everything it knows about tasks,
//! users and organizations arrives through these traits. Implementations are
//! expected to be dumb: organization filtering, role checks and field
//! visibility all happen in the services, the store only fetches and writes.
//! `memory` provides in-process implementations used by the test suite and
//! by embedders that do not need durable storage.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Organization, Task, User};

/// Task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// All tasks of one organization, ordered for team listings.
    async fn find_all_in_org(&self, organization_id: Uuid) -> Result<Vec<Task>, AppError>;

    /// Tasks of one organization assigned to one user, ordered for personal
    /// listings.
    async fn find_by_assignee(
        &self,
        organization_id: Uuid,
        assignee_id: Uuid,
    ) -> Result<Vec<Task>, AppError>;

    async fn create(&self, task: Task) -> Result<Task, AppError>;

    async fn update(&self, task: Task) -> Result<Task, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

/// User and organization persistence contract.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Lookup by username or email, used by credential verification.
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, AppError>;

    async fn find_users_in_org(&self, organization_id: Uuid) -> Result<Vec<User>, AppError>;

    async fn create_user(&self, user: User) -> Result<User, AppError>;

    async fn update_user(&self, user: User) -> Result<User, AppError>;

    async fn find_org_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError>;

    async fn update_org(&self, organization: Organization) -> Result<Organization, AppError>;
}
