#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use taskhub::models::{
    CreateTaskInput, CreateUserInput, Organization, Principal, Role, Task, TaskPriority,
    TaskStatus, User,
};
use taskhub::store::memory::{InMemoryDirectoryStore, InMemoryTaskStore};
use taskhub::store::{DirectoryStore, TaskStore};

// Structurally valid bcrypt hash for seeded users whose password is never
// actually verified.
pub const PLACEHOLDER_HASH: &str = "$2b$04$abcdefghijklmnopqrstuvABCDEFGHIJKLMNOPQRSTUV123456789";

pub struct TestEnv {
    pub tasks: Arc<InMemoryTaskStore>,
    pub directory: Arc<InMemoryDirectoryStore>,
    pub org_a: Organization,
    pub org_b: Organization,
}

pub fn make_org(name: &str, max_users: u32) -> Organization {
    let now = Utc::now();
    Organization {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        active: true,
        max_users,
        created_at: now,
        updated_at: now,
    }
}

/// Two organizations, empty stores.
pub async fn seed_env() -> TestEnv {
    let tasks = Arc::new(InMemoryTaskStore::new());
    let directory = Arc::new(InMemoryDirectoryStore::new());

    let org_a = make_org("Org A", 10);
    let org_b = make_org("Org B", 10);
    directory.insert_org(org_a.clone()).await;
    directory.insert_org(org_b.clone()).await;

    TestEnv {
        tasks,
        directory,
        org_a,
        org_b,
    }
}

pub async fn add_user(env: &TestEnv, organization_id: Uuid, role: Role, username: &str) -> User {
    let input = CreateUserInput {
        name: format!("{} name", username),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "irrelevant-password".to_string(),
        role,
        active: Some(true),
        visible_topic_ids: None,
    };
    let user = User::new(input, organization_id, PLACEHOLDER_HASH.to_string(), true);
    env.directory.create_user(user).await.unwrap()
}

pub async fn add_task(
    env: &TestEnv,
    organization_id: Uuid,
    assignee_id: Option<Uuid>,
    title: &str,
) -> Task {
    let task = Task::new(
        CreateTaskInput {
            topic_id: Some(Uuid::new_v4()),
            title: title.to_string(),
            note: Some("internal note".to_string()),
            assignee_id,
            status: Some(TaskStatus::Todo),
            priority: Some(TaskPriority::Normal),
            due_date: None,
        },
        organization_id,
    );
    env.tasks.create(task).await.unwrap()
}

pub fn principal_of(user: &User) -> Principal {
    Principal::from_user(user)
}

/// Flips the active flag on a seeded organization.
pub async fn set_org_active(env: &TestEnv, organization_id: Uuid, active: bool) {
    let mut org = env
        .directory
        .find_org_by_id(organization_id)
        .await
        .unwrap()
        .unwrap();
    org.active = active;
    env.directory.insert_org(org).await;
}
