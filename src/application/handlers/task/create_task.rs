//! CreateTaskHandler - Command handler for creating tasks.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use super::reassign_task::ensure_employees_exist;
use super::TaskCommandError;
use crate::domain::foundation::{EmployeeId, EntityRepository, ProjectId};
use crate::domain::records::{Task, TaskData, TaskStatus};
use crate::ports::{EmployeeRepository, ProjectRepository, TaskRepository};

/// Command to create a task in a project.
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub project: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub assignees: Vec<EmployeeId>,
}

/// Handler for creating tasks.
pub struct CreateTaskHandler {
    tasks: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl CreateTaskHandler {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        projects: Arc<dyn ProjectRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            tasks,
            projects,
            employees,
        }
    }

    pub async fn handle(&self, cmd: CreateTaskCommand) -> Result<Task, TaskCommandError> {
        // 1. Validate input before touching storage
        let data = TaskData::new(
            cmd.project,
            cmd.title,
            cmd.description,
            TaskStatus::Open,
            cmd.due_date,
            cmd.assignees,
        )?;

        // 2. Referenced rows must exist
        if !self.projects.exists(cmd.project).await? {
            return Err(TaskCommandError::ProjectNotFound(cmd.project));
        }
        ensure_employees_exist(self.employees.as_ref(), data.assignees()).await?;

        // 3. Persist
        let task = self.tasks.insert(data).await?;

        info!(task_id = %task.id(), project_id = %cmd.project, "Task created");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEmployeeRepository, InMemoryProjectRepository, InMemoryTaskRepository,
    };
    use crate::domain::foundation::{ValidationError, Version};
    use crate::domain::records::{EmployeeData, ProjectData};

    struct Fixture {
        handler: CreateTaskHandler,
        tasks: Arc<InMemoryTaskRepository>,
        project: ProjectId,
        employee: EmployeeId,
    }

    async fn fixture() -> Fixture {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new("Project"));
        let employees = Arc::new(InMemoryEmployeeRepository::new("Employee"));

        let project = projects
            .insert(ProjectData::new("Apollo", None, None).unwrap())
            .await
            .unwrap();
        let employee = employees
            .insert(EmployeeData::new("Margaret", "Hamilton", None, None, None).unwrap())
            .await
            .unwrap();

        Fixture {
            handler: CreateTaskHandler::new(tasks.clone(), projects, employees),
            tasks,
            project: *project.id(),
            employee: *employee.id(),
        }
    }

    fn command(project: ProjectId, assignees: Vec<EmployeeId>) -> CreateTaskCommand {
        CreateTaskCommand {
            project,
            title: "Write guidance software".into(),
            description: None,
            due_date: None,
            assignees,
        }
    }

    #[tokio::test]
    async fn creates_open_task_at_version_one() {
        let f = fixture().await;

        let task = f.handler.handle(command(f.project, vec![f.employee])).await.unwrap();

        assert_eq!(task.version(), Version::INITIAL);
        assert_eq!(task.data().status(), TaskStatus::Open);
        assert!(task.data().is_assigned_to(f.employee));
        assert!(f.tasks.find_by_id(*task.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_project() {
        let f = fixture().await;
        let missing = ProjectId::new(404).unwrap();

        let err = f.handler.handle(command(missing, vec![])).await.unwrap_err();

        assert_eq!(err, TaskCommandError::ProjectNotFound(missing));
    }

    #[tokio::test]
    async fn rejects_unknown_assignee() {
        let f = fixture().await;
        let ghost = EmployeeId::new(99).unwrap();

        let err = f
            .handler
            .handle(command(f.project, vec![f.employee, ghost]))
            .await
            .unwrap_err();

        assert_eq!(err, TaskCommandError::EmployeeNotFound(ghost));
    }

    #[tokio::test]
    async fn rejects_blank_title() {
        let f = fixture().await;
        let mut cmd = command(f.project, vec![]);
        cmd.title = "   ".into();

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err, TaskCommandError::Validation(ValidationError::empty_field("title")));
    }
}
