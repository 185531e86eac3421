//! In-memory store implementations backed by `HashMap`s behind async locks.
//! Used by the test suite and by embedders without durable storage.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Organization, Task, User};
use crate::store::{DirectoryStore, TaskStore};

#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Personal listings: priority desc, earliest due date first (undated last),
// newest first as the tiebreak.
fn personal_order(a: &Task, b: &Task) -> std::cmp::Ordering {
    Reverse(a.priority)
        .cmp(&Reverse(b.priority))
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        })
        .then_with(|| Reverse(a.created_at).cmp(&Reverse(b.created_at)))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn find_all_in_org(&self, organization_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut result: Vec<Task> = tasks
            .values()
            .filter(|t| t.organization_id == organization_id)
            .cloned()
            .collect();
        // Team listing: open work first, then by priority, newest first
        result.sort_by(|a, b| {
            a.status
                .cmp(&b.status)
                .then_with(|| Reverse(a.priority).cmp(&Reverse(b.priority)))
                .then_with(|| Reverse(a.created_at).cmp(&Reverse(b.created_at)))
        });
        Ok(result)
    }

    async fn find_by_assignee(
        &self,
        organization_id: Uuid,
        assignee_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut result: Vec<Task> = tasks
            .values()
            .filter(|t| {
                t.organization_id == organization_id && t.assignee_id == Some(assignee_id)
            })
            .cloned()
            .collect();
        result.sort_by(personal_order);
        Ok(result)
    }

    async fn create(&self, task: Task) -> Result<Task, AppError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        if !tasks.contains_key(&task.id) {
            return Err(AppError::NotFound("Task not found".into()));
        }
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match self.tasks.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Task not found".into())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryDirectoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    organizations: RwLock<HashMap<Uuid, Organization>>,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an organization. Organization creation belongs to the
    /// registration flow outside this crate, so it is not part of the
    /// `DirectoryStore` contract.
    pub async fn insert_org(&self, organization: Organization) {
        self.organizations
            .write()
            .await
            .insert(organization.id, organization);
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == login || u.email == login)
            .cloned())
    }

    async fn find_users_in_org(&self, organization_id: Uuid) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .values()
            .filter(|u| u.organization_id == organization_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn create_user(&self, user: User) -> Result<User, AppError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AppError::NotFound("User not found".into()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_org_by_id(&self, id: Uuid) -> Result<Option<Organization>, AppError> {
        Ok(self.organizations.read().await.get(&id).cloned())
    }

    async fn update_org(&self, organization: Organization) -> Result<Organization, AppError> {
        let mut organizations = self.organizations.write().await;
        if !organizations.contains_key(&organization.id) {
            return Err(AppError::NotFound("Organization not found".into()));
        }
        organizations.insert(organization.id, organization.clone());
        Ok(organization)
    }
}
