//! Task aggregate.
//!
//! A task's assignees are its dependent collection: stored apart from the
//! task row, loaded eagerly as a set and replaced wholesale on every update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    optional_text, required_text, EmployeeId, Entity, ProjectId, TaskId, ValidationError,
    MAX_TEXT_LENGTH,
};

/// Longest task description accepted.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Stored task snapshot.
pub type Task = Entity<TaskId, TaskData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TaskStatus::Open),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ValidationError::invalid_format("TaskStatus", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    project: ProjectId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    assignees: BTreeSet<EmployeeId>,
}

impl TaskData {
    pub fn new(
        project: ProjectId,
        title: impl Into<String>,
        description: Option<String>,
        status: TaskStatus,
        due_date: Option<NaiveDate>,
        assignees: impl IntoIterator<Item = EmployeeId>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            project,
            title: required_text("title", title, MAX_TEXT_LENGTH)?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
            status,
            due_date,
            assignees: assignees.into_iter().collect(),
        })
    }

    pub fn project(&self) -> ProjectId {
        self.project
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn assignees(&self) -> &BTreeSet<EmployeeId> {
        &self.assignees
    }

    pub fn is_assigned_to(&self, employee: EmployeeId) -> bool {
        self.assignees.contains(&employee)
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Replaces the whole assignee set.
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, ValidationError> {
        self.title = required_text("title", title, MAX_TEXT_LENGTH)?;
        Ok(self)
    }
}
