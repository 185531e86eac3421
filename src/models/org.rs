use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An organization (tenant). Users and tasks reference it by id; nothing in
/// this crate cascades when an organization is deactivated, data simply stops
/// being mutable for its members.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    /// Unique URL-safe identifier, fixed at creation. There is deliberately
    /// no way to change it through `UpdateOrganizationInput`.
    pub slug: String,
    pub active: bool,
    /// Maximum number of active users the organization may hold.
    pub max_users: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for an organization. `None` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOrganizationInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub max_users: Option<u32>,
}

/// Read-only usage aggregate for an organization.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct OrganizationStats {
    pub user_count: usize,
    pub active_user_count: usize,
    pub task_count: usize,
    pub active_task_count: usize,
    pub completed_task_count: usize,
}
