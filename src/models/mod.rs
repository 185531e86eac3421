pub mod org;
pub mod role;
pub mod task;
pub mod user;

pub use org::{Organization, OrganizationStats, UpdateOrganizationInput};
pub use role::Role;
pub use task::{
    AssigneeRef, CreateOwnTaskInput, CreateTaskInput, Task, TaskDetail, TaskPriority, TaskStatus,
    TaskSummary, TaskView, UpdateTaskInput,
};
pub use user::{CreateUserInput, Principal, UpdateUserInput, User, UserRef};
