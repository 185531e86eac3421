use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRef};

/// Represents the priority of a task.
///
/// Ordered so that `High > Normal > Low`, which listing code relies on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
}

/// Represents the status of a task.
///
/// Transitions among the three states are unrestricted: any principal allowed
/// to update a task's status may set any value.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// TODO and IN_PROGRESS count as active for listings and statistics.
    pub fn is_active(self) -> bool {
        matches!(self, TaskStatus::Todo | TaskStatus::InProgress)
    }
}

/// A task entity. `organization_id` is set at creation and never reassigned;
/// the assignee, when present, is always a user of the same organization.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Task {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub topic_id: Option<Uuid>,
    pub title: String,
    pub note: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stamped when the status enters DONE, cleared when it leaves DONE.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new `Task` from `CreateTaskInput` and the owning
    /// organization. Sets `created_at`/`updated_at` to the current time and
    /// `id` to a new UUID. Status defaults to TODO, priority to NORMAL.
    pub fn new(input: CreateTaskInput, organization_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organization_id,
            topic_id: input.topic_id,
            title: input.title,
            note: input.note,
            status: input.status.unwrap_or(TaskStatus::Todo),
            priority: input.priority.unwrap_or(TaskPriority::Normal),
            due_date: input.due_date,
            assignee_id: input.assignee_id,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Sets the status, maintaining `completed_at`: stamped on a transition
    /// into DONE, cleared on a transition out of it.
    pub fn set_status(&mut self, status: TaskStatus) {
        let now = Utc::now();
        if status == TaskStatus::Done && self.status != TaskStatus::Done {
            self.completed_at = Some(now);
        }
        if status != TaskStatus::Done && self.status == TaskStatus::Done {
            self.completed_at = None;
        }
        self.status = status;
        self.updated_at = now;
    }

    /// Applies a partial update. `None` fields are left unchanged.
    pub fn apply_update(&mut self, input: UpdateTaskInput) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(note) = input.note {
            self.note = Some(note);
        }
        if let Some(priority) = input.priority {
            self.priority = priority;
        }
        if let Some(due_date) = input.due_date {
            self.due_date = Some(due_date);
        }
        match input.status {
            Some(status) => self.set_status(status),
            None => self.updated_at = Utc::now(),
        }
    }
}

/// Input structure for creating a task through the privileged endpoint,
/// which may assign the task to any user of the organization.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskInput {
    pub topic_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub note: Option<String>,

    pub assignee_id: Option<Uuid>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Input structure for the self-service creation path.
///
/// Any `assignee_id` supplied here is discarded: the stored task is always
/// assigned to the calling principal, and its status is always TODO.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOwnTaskInput {
    pub topic_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 1000))]
    pub note: Option<String>,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,

    /// Ignored. Present so self-service payloads carrying an assignee are
    /// accepted and overridden instead of rejected.
    pub assignee_id: Option<Uuid>,
}

impl CreateOwnTaskInput {
    /// Converts into a `CreateTaskInput` pinned to the given assignee,
    /// overriding whatever the payload carried.
    pub fn into_self_assigned(self, assignee_id: Uuid) -> CreateTaskInput {
        CreateTaskInput {
            topic_id: self.topic_id,
            title: self.title,
            note: self.note,
            assignee_id: Some(assignee_id),
            status: None,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

/// Partial update for a task. `None` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub note: Option<String>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Full task representation served to privileged users and to members
/// reading their own tasks.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TaskDetail {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub topic_id: Option<Uuid>,
    pub title: String,
    pub note: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskDetail {
    pub fn new(task: Task, assignee: Option<UserRef>) -> Self {
        Self {
            id: task.id,
            organization_id: task.organization_id,
            topic_id: task.topic_id,
            title: task.title,
            note: task.note,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            assignee,
            created_at: task.created_at,
            updated_at: task.updated_at,
            completed_at: task.completed_at,
        }
    }
}

/// Reduced assignee reference for the restricted view: identifier and
/// display name only.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AssigneeRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&User> for AssigneeRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// Restricted task representation served to GUEST principals. Note, topic
/// and the full assignee object are withheld.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TaskSummary {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<AssigneeRef>,
}

impl TaskSummary {
    pub fn new(task: Task, assignee: Option<AssigneeRef>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            assignee,
        }
    }
}

/// What a read operation yields: the field set depends on the caller's role.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TaskView {
    Full(TaskDetail),
    Restricted(TaskSummary),
}
