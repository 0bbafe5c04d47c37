//! UpdateTaskHandler - Edits a task's title, status or due date.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use super::reassign_task::load_task;
use super::TaskCommandError;
use crate::domain::foundation::{EntityRepository, TaskId, Version};
use crate::domain::records::{Task, TaskStatus};
use crate::ports::TaskRepository;

/// Command to edit a task. `None` leaves a field unchanged; `due_date:
/// Some(None)` clears the due date.
#[derive(Debug, Clone)]
pub struct UpdateTaskCommand {
    pub task_id: TaskId,
    /// Version the caller last read, checked before the edit is applied.
    pub expected_version: Option<Version>,
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTaskCommand {
    /// A command that changes nothing yet.
    pub fn for_task(task_id: TaskId, expected_version: Option<Version>) -> Self {
        Self {
            task_id,
            expected_version,
            title: None,
            status: None,
            due_date: None,
        }
    }
}

/// Handler for editing tasks.
///
/// Assignees are carried over from the loaded snapshot; the repository still
/// rewrites the whole association on save.
pub struct UpdateTaskHandler {
    tasks: Arc<dyn TaskRepository>,
}

impl UpdateTaskHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    pub async fn handle(&self, cmd: UpdateTaskCommand) -> Result<Task, TaskCommandError> {
        let current = load_task(self.tasks.as_ref(), cmd.task_id, cmd.expected_version).await?;

        let mut data = current.data().clone();
        if let Some(title) = cmd.title {
            data = data.with_title(title)?;
        }
        if let Some(status) = cmd.status {
            data = data.with_status(status);
        }
        if let Some(due_date) = cmd.due_date {
            data = data.with_due_date(due_date);
        }

        let task = self.tasks.update(&current.with_data(data)).await?;

        info!(task_id = %task.id(), version = %task.version(), "Task updated");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTaskRepository;
    use crate::domain::foundation::{EmployeeId, ProjectId, RepositoryError, ValidationError};
    use crate::domain::records::TaskData;

    async fn seeded() -> (Arc<InMemoryTaskRepository>, UpdateTaskHandler, Task) {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let task = tasks
            .insert(
                TaskData::new(
                    ProjectId::new(1).unwrap(),
                    "Draft report",
                    None,
                    TaskStatus::Open,
                    NaiveDate::from_ymd_opt(2026, 12, 1),
                    [EmployeeId::new(1).unwrap()],
                )
                .unwrap(),
            )
            .await
            .unwrap();
        let handler = UpdateTaskHandler::new(tasks.clone());
        (tasks, handler, task)
    }

    #[tokio::test]
    async fn applies_partial_edit_and_keeps_assignees() {
        let (tasks, handler, task) = seeded().await;

        let mut cmd = UpdateTaskCommand::for_task(*task.id(), Some(task.version()));
        cmd.status = Some(TaskStatus::InProgress);
        cmd.due_date = Some(None);
        let updated = handler.handle(cmd).await.unwrap();

        assert_eq!(updated.version().value(), 2);
        let stored = tasks.find_by_id(*task.id()).await.unwrap().unwrap();
        assert_eq!(stored.data().status(), TaskStatus::InProgress);
        assert_eq!(stored.data().due_date(), None);
        assert_eq!(stored.data().title(), "Draft report");
        assert!(stored.data().is_assigned_to(EmployeeId::new(1).unwrap()));
    }

    #[tokio::test]
    async fn conflict_is_propagated_unchanged() {
        let (_tasks, handler, task) = seeded().await;

        let mut first = UpdateTaskCommand::for_task(*task.id(), Some(task.version()));
        first.title = Some("Final report".into());
        handler.handle(first).await.unwrap();

        let mut second = UpdateTaskCommand::for_task(*task.id(), Some(task.version()));
        second.title = Some("Other report".into());
        let err = handler.handle(second).await.unwrap_err();

        assert_eq!(
            err,
            TaskCommandError::Repository(RepositoryError::optimistic_locking(
                "Task",
                task.id(),
                Version::INITIAL
            ))
        );
    }

    #[tokio::test]
    async fn invalid_title_writes_nothing() {
        let (tasks, handler, task) = seeded().await;

        let mut cmd = UpdateTaskCommand::for_task(*task.id(), None);
        cmd.title = Some("x".repeat(151));
        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(
            err,
            TaskCommandError::Validation(ValidationError::field_too_long("title", 150, 151))
        );
        let stored = tasks.find_by_id(*task.id()).await.unwrap().unwrap();
        assert_eq!(stored.version(), Version::INITIAL);
    }
}
