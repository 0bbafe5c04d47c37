//! Errors returned by the task command handlers.

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, EmployeeId, ErrorCode, ProjectId, RepositoryError, TaskId, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskCommandError {
    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    #[error("Project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("Employee {0} not found")]
    EmployeeNotFound(EmployeeId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Passed through as returned by the repository, including
    /// `OptimisticLockingFailure`.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TaskCommandError {
    /// True when the task changed since the caller read it.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_conflict())
    }
}

impl From<TaskCommandError> for DomainError {
    fn from(err: TaskCommandError) -> Self {
        match err {
            TaskCommandError::TaskNotFound(id) => {
                DomainError::new(ErrorCode::TaskNotFound, format!("Task {} not found", id))
            }
            TaskCommandError::ProjectNotFound(id) => {
                DomainError::new(ErrorCode::ProjectNotFound, format!("Project {} not found", id))
            }
            TaskCommandError::EmployeeNotFound(id) => DomainError::new(
                ErrorCode::EmployeeNotFound,
                format!("Employee {} not found", id),
            ),
            TaskCommandError::Validation(e) => e.into(),
            TaskCommandError::Repository(e) => e.into(),
        }
    }
}
