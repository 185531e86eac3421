use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::role::Role;

lazy_static::lazy_static! {
    // Alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// A user account. Every user belongs to exactly one organization for its
/// lifetime; `organization_id` is set at creation and never changes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    /// bcrypt hash of the user's password. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Topic identifiers a GUEST is scoped to. Empty for other roles.
    pub visible_topic_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new `User` from validated input, the owning organization and
    /// an already-computed password hash.
    ///
    /// `visible_topic_ids` is honored only for GUEST accounts; other roles
    /// see every topic and the list is dropped.
    pub fn new(
        input: CreateUserInput,
        organization_id: Uuid,
        password_hash: String,
        active: bool,
    ) -> Self {
        let now = Utc::now();
        let visible_topic_ids = if input.role.is_guest() {
            input.visible_topic_ids.unwrap_or_default()
        } else {
            Vec::new()
        };
        Self {
            id: Uuid::new_v4(),
            organization_id,
            name: input.name,
            username: input.username,
            email: input.email,
            role: input.role,
            active,
            password_hash,
            visible_topic_ids,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The authenticated identity a request is evaluated against.
///
/// Derived per request by the authentication layer and never persisted. The
/// core trusts these three values and nothing from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            organization_id: user.organization_id,
            role: user.role,
        }
    }
}

/// Assignee reference embedded in full task views.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
        }
    }
}

/// Input structure for creating a user account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,

    pub role: Role,

    /// Defaults to `true` when omitted.
    pub active: Option<bool>,

    /// Only meaningful for GUEST accounts.
    pub visible_topic_ids: Option<Vec<Uuid>>,
}

/// Partial update for a user account. `None` fields are left unchanged.
/// The organization and the username are immutable.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub role: Option<Role>,

    pub active: Option<bool>,

    #[validate(length(min = 8, max = 100))]
    pub password: Option<String>,

    pub visible_topic_ids: Option<Vec<Uuid>>,
}
