//! Task repository port.
//!
//! # Dependent collection
//!
//! A task's assignees live in their own association. Implementations must:
//! - load them together with the task row as one logical read
//! - on `update`, delete every existing assignee row and insert the new set
//!   (no diffing) in the same transaction as the version check
//! - on `delete_by_id`, remove the assignee rows along with the task

use async_trait::async_trait;

use crate::domain::foundation::{EmployeeId, EntityRepository, ProjectId, RepositoryError, TaskId};
use crate::domain::records::{Task, TaskData};

/// Repository port for Task aggregates.
#[async_trait]
pub trait TaskRepository: EntityRepository<TaskId, TaskData> {
    /// Tasks belonging to a project, ordered by id.
    async fn find_by_project(&self, project: ProjectId) -> Result<Vec<Task>, RepositoryError>;

    /// Tasks the employee is currently assigned to, ordered by id.
    async fn find_by_assignee(&self, employee: EmployeeId) -> Result<Vec<Task>, RepositoryError>;
}
