//! Task lifecycle rules: who may create, read, update and delete tasks, and
//! which fields each role gets to see.
//!
//! The visibility rules are deliberately asymmetric. A member asking for a
//! task that is not assigned to them is told the task does not exist, the
//! same answer given for a task in another organization or no task at all.
//! Only an operation on a task the caller is allowed to see can fail with
//! `Forbidden`.

use std::sync::Arc;

use futures::future::try_join_all;
use uuid::Uuid;
use validator::Validate;

use crate::access::authorize_org_scope;
use crate::error::AppError;
use crate::models::{
    AssigneeRef, CreateOwnTaskInput, CreateTaskInput, Principal, Task, TaskDetail, TaskStatus,
    TaskSummary, TaskView, UpdateTaskInput, UserRef,
};
use crate::service::ensure_org_active;
use crate::store::{DirectoryStore, TaskStore};

const TASK_NOT_FOUND: &str = "Task not found";

pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    directory: Arc<dyn DirectoryStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>, directory: Arc<dyn DirectoryStore>) -> Self {
        Self { tasks, directory }
    }

    /// Lists the organization's tasks. Privileged roles and members receive
    /// full views; guests receive the restricted field set.
    pub async fn list_team(&self, principal: &Principal) -> Result<Vec<TaskView>, AppError> {
        let tasks = self
            .tasks
            .find_all_in_org(principal.organization_id)
            .await?;

        if principal.role.is_guest() {
            let summaries = try_join_all(tasks.into_iter().map(|t| self.summary(t))).await?;
            Ok(summaries.into_iter().map(TaskView::Restricted).collect())
        } else {
            let details = try_join_all(tasks.into_iter().map(|t| self.detail(t))).await?;
            Ok(details.into_iter().map(TaskView::Full).collect())
        }
    }

    /// Lists the tasks assigned to the caller.
    pub async fn list_mine(&self, principal: &Principal) -> Result<Vec<TaskDetail>, AppError> {
        let tasks = self
            .tasks
            .find_by_assignee(principal.organization_id, principal.user_id)
            .await?;
        try_join_all(tasks.into_iter().map(|t| self.detail(t))).await
    }

    /// Reads a single task.
    ///
    /// Absent, cross-tenant, and (for members) not-assigned-to-me all yield
    /// the same `NotFound`. Guests get the restricted view.
    pub async fn get(&self, principal: &Principal, task_id: Uuid) -> Result<TaskView, AppError> {
        let task = self.fetch_in_org(principal, task_id).await?;

        if principal.role.is_guest() {
            return Ok(TaskView::Restricted(self.summary(task).await?));
        }

        if !principal.role.is_privileged() && task.assignee_id != Some(principal.user_id) {
            return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
        }

        Ok(TaskView::Full(self.detail(task).await?))
    }

    /// Creates a task, assigning it to any user of the organization.
    /// Privileged roles only.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateTaskInput,
    ) -> Result<TaskDetail, AppError> {
        if principal.role.is_guest() {
            return Err(AppError::Forbidden("Guest users cannot create tasks".into()));
        }
        if !principal.role.is_privileged() {
            return Err(AppError::Forbidden("Insufficient permissions".into()));
        }
        input.validate()?;
        ensure_org_active(self.directory.as_ref(), principal.organization_id).await?;

        if let Some(assignee_id) = input.assignee_id {
            self.ensure_assignable(principal, assignee_id).await?;
        }

        let task = Task::new(input, principal.organization_id);
        let task = self.tasks.create(task).await?;
        self.detail(task).await
    }

    /// Creates a task through the self-service path. Any role but GUEST; the
    /// stored task is always assigned to the caller, whatever the payload
    /// said, and always starts as TODO.
    pub async fn create_own(
        &self,
        principal: &Principal,
        input: CreateOwnTaskInput,
    ) -> Result<TaskDetail, AppError> {
        if principal.role.is_guest() {
            return Err(AppError::Forbidden("Guest users cannot create tasks".into()));
        }
        input.validate()?;
        ensure_org_active(self.directory.as_ref(), principal.organization_id).await?;

        let task = Task::new(
            input.into_self_assigned(principal.user_id),
            principal.organization_id,
        );
        let task = self.tasks.create(task).await?;
        self.detail(task).await
    }

    /// Updates a task's status. Privileged roles may update any in-tenant
    /// task, members only their own.
    pub async fn update_status(
        &self,
        principal: &Principal,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<TaskDetail, AppError> {
        if principal.role.is_guest() {
            return Err(AppError::Forbidden("Guest users cannot update tasks".into()));
        }

        let mut task = self.fetch_in_org(principal, task_id).await?;
        self.ensure_may_touch(principal, &task, "update")?;
        ensure_org_active(self.directory.as_ref(), principal.organization_id).await?;

        task.set_status(status);
        let task = self.tasks.update(task).await?;
        self.detail(task).await
    }

    /// Applies a full-field patch to a task. Same permission rule as
    /// `update_status`.
    pub async fn update(
        &self,
        principal: &Principal,
        task_id: Uuid,
        input: UpdateTaskInput,
    ) -> Result<TaskDetail, AppError> {
        if principal.role.is_guest() {
            return Err(AppError::Forbidden("Guest users cannot update tasks".into()));
        }
        input.validate()?;

        let mut task = self.fetch_in_org(principal, task_id).await?;
        self.ensure_may_touch(principal, &task, "update")?;
        ensure_org_active(self.directory.as_ref(), principal.organization_id).await?;

        task.apply_update(input);
        let task = self.tasks.update(task).await?;
        self.detail(task).await
    }

    /// Deletes a task. Privileged roles may delete any in-tenant task,
    /// members only their own.
    pub async fn delete(&self, principal: &Principal, task_id: Uuid) -> Result<(), AppError> {
        if principal.role.is_guest() {
            return Err(AppError::Forbidden("Guest users cannot delete tasks".into()));
        }

        let task = self.fetch_in_org(principal, task_id).await?;
        self.ensure_may_touch(principal, &task, "delete")?;
        ensure_org_active(self.directory.as_ref(), principal.organization_id).await?;

        self.tasks.delete(task.id).await
    }

    /// Fetches a task, translating both "absent" and "in another
    /// organization" into the same `NotFound`.
    async fn fetch_in_org(&self, principal: &Principal, task_id: Uuid) -> Result<Task, AppError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.into()))?;
        authorize_org_scope(principal, task.organization_id, "Task")?;
        Ok(task)
    }

    /// Ownership rule for mutations: privileged roles touch anything
    /// in-tenant, everyone else only their own tasks.
    fn ensure_may_touch(
        &self,
        principal: &Principal,
        task: &Task,
        verb: &str,
    ) -> Result<(), AppError> {
        if principal.role.is_privileged() || task.assignee_id == Some(principal.user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "You can only {} your own tasks",
                verb
            )))
        }
    }

    /// The assignee of a new task must be a user of the same organization.
    /// Absent and cross-tenant assignees get the same rejection so the
    /// response does not confirm users of other organizations exist.
    async fn ensure_assignable(
        &self,
        principal: &Principal,
        assignee_id: Uuid,
    ) -> Result<(), AppError> {
        match self.directory.find_user_by_id(assignee_id).await? {
            Some(user) if user.organization_id == principal.organization_id => Ok(()),
            _ => Err(AppError::ValidationError("Assignee not found".into())),
        }
    }

    async fn detail(&self, task: Task) -> Result<TaskDetail, AppError> {
        let assignee = match task.assignee_id {
            Some(id) => self
                .directory
                .find_user_by_id(id)
                .await?
                .map(|u| UserRef::from(&u)),
            None => None,
        };
        Ok(TaskDetail::new(task, assignee))
    }

    async fn summary(&self, task: Task) -> Result<TaskSummary, AppError> {
        let assignee = match task.assignee_id {
            Some(id) => self
                .directory
                .find_user_by_id(id)
                .await?
                .map(|u| AssigneeRef::from(&u)),
            None => None,
        };
        Ok(TaskSummary::new(task, assignee))
    }
}
