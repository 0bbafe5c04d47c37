//! ReassignTaskHandler - Replaces a task's assignee set.

use std::sync::Arc;
use tracing::info;

use super::TaskCommandError;
use crate::domain::foundation::{EmployeeId, EntityRepository, RepositoryError, TaskId, Version};
use crate::domain::records::Task;
use crate::ports::{EmployeeRepository, TaskRepository};

/// Command to replace every assignee of a task.
#[derive(Debug, Clone)]
pub struct ReassignTaskCommand {
    pub task_id: TaskId,
    /// Version the caller last read. When set, a mismatch fails fast with
    /// `OptimisticLockingFailure` instead of overwriting newer data.
    pub expected_version: Option<Version>,
    pub assignees: Vec<EmployeeId>,
}

/// Handler for reassigning tasks.
pub struct ReassignTaskHandler {
    tasks: Arc<dyn TaskRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl ReassignTaskHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>, employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { tasks, employees }
    }

    pub async fn handle(&self, cmd: ReassignTaskCommand) -> Result<Task, TaskCommandError> {
        // 1. Load current snapshot
        let current = load_task(self.tasks.as_ref(), cmd.task_id, cmd.expected_version).await?;

        // 2. Every new assignee must exist
        ensure_employees_exist(self.employees.as_ref(), &cmd.assignees).await?;

        // 3. Replace the set and persist
        let data = current.data().clone().with_assignees(cmd.assignees);
        let task = self.tasks.update(&current.with_data(data)).await?;

        info!(
            task_id = %task.id(),
            version = %task.version(),
            assignees = task.data().assignees().len(),
            "Task reassigned"
        );
        Ok(task)
    }
}

/// Loads a task, checking the caller's version when one is given.
pub(super) async fn load_task(
    tasks: &dyn TaskRepository,
    id: TaskId,
    expected_version: Option<Version>,
) -> Result<Task, TaskCommandError> {
    let task = tasks
        .find_by_id(id)
        .await?
        .ok_or(TaskCommandError::TaskNotFound(id))?;

    match expected_version {
        Some(expected) if expected != task.version() => {
            Err(RepositoryError::optimistic_locking("Task", id, expected).into())
        }
        _ => Ok(task),
    }
}

pub(super) async fn ensure_employees_exist<'a>(
    employees: &dyn EmployeeRepository,
    ids: impl IntoIterator<Item = &'a EmployeeId>,
) -> Result<(), TaskCommandError> {
    for id in ids {
        if !employees.exists(*id).await? {
            return Err(TaskCommandError::EmployeeNotFound(*id));
        }
    }
    Ok(())
}
