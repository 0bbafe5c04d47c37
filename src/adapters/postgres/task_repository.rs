//! PostgreSQL implementation of TaskRepository.
//!
//! Assignees live in `task_assignees`. Reads aggregate them into the task row
//! with `array_agg`; `update` runs the version check, deletes every existing
//! association row and re-inserts the new set inside one transaction.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, warn};

use super::support::{check_updated, database_error};
use crate::domain::foundation::{
    EmployeeId, Entity, EntityRepository, ProjectId, RepositoryError, TaskId, Version,
};
use crate::domain::records::{Task, TaskData, TaskStatus};
use crate::ports::TaskRepository;

const ENTITY: &str = "Task";

const SELECT_TASKS: &str = r#"
    SELECT t.id, t.version, t.project_id, t.title, t.description, t.status, t.due_date,
           COALESCE(
               array_agg(a.employee_id ORDER BY a.employee_id)
                   FILTER (WHERE a.employee_id IS NOT NULL),
               '{}'
           ) AS assignees
    FROM tasks t
    LEFT JOIN task_assignees a ON a.task_id = t.id
"#;

/// PostgreSQL implementation of the TaskRepository port.
#[derive(Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, filter: &str, key: i64) -> Result<Vec<Task>, RepositoryError> {
        let sql = format!("{} WHERE {} GROUP BY t.id ORDER BY t.id", SELECT_TASKS, filter);
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("fetch tasks"))?;

        rows.into_iter().map(Task::try_from).collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    version: i32,
    project_id: i64,
    title: String,
    description: Option<String>,
    status: String,
    due_date: Option<NaiveDate>,
    assignees: Vec<i64>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let assignees = row
            .assignees
            .into_iter()
            .map(EmployeeId::new)
            .collect::<Result<Vec<_>, _>>()?;
        let data = TaskData::new(
            ProjectId::new(row.project_id)?,
            row.title,
            row.description,
            row.status.parse::<TaskStatus>()?,
            row.due_date,
            assignees,
        )?;
        Ok(Entity::new(TaskId::new(row.id)?, Version::new(row.version)?, data))
    }
}

/// Inserts one association row per assignee.
async fn insert_assignees(
    tx: &mut Transaction<'_, Postgres>,
    task: TaskId,
    data: &TaskData,
) -> Result<(), RepositoryError> {
    for employee in data.assignees() {
        sqlx::query("INSERT INTO task_assignees (task_id, employee_id) VALUES ($1, $2)")
            .bind(task.value())
            .bind(employee.value())
            .execute(&mut **tx)
            .await
            .map_err(database_error("insert task assignee"))?;
    }
    Ok(())
}

#[async_trait]
impl EntityRepository<TaskId, TaskData> for PostgresTaskRepository {
    async fn insert(&self, data: TaskData) -> Result<Task, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error("start transaction"))?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tasks (version, project_id, title, description, status, due_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Version::INITIAL.value())
        .bind(data.project().value())
        .bind(data.title())
        .bind(data.description())
        .bind(data.status().as_str())
        .bind(data.due_date())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("insert task"))?;

        let id = TaskId::new(id)?;
        insert_assignees(&mut tx, id, &data).await?;

        tx.commit().await.map_err(database_error("commit transaction"))?;

        debug!(task_id = %id, assignees = data.assignees().len(), "Inserted task");
        Ok(Entity::new(id, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let sql = format!("{} WHERE t.id = $1 GROUP BY t.id", SELECT_TASKS);
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("fetch task"))?;

        row.map(Task::try_from).transpose()
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let data = task.data();
        let mut tx = self.pool.begin().await.map_err(database_error("start transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                project_id = $3,
                title = $4,
                description = $5,
                status = $6,
                due_date = $7,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(task.id().value())
        .bind(task.version().value())
        .bind(data.project().value())
        .bind(data.title())
        .bind(data.description())
        .bind(data.status().as_str())
        .bind(data.due_date())
        .execute(&mut *tx)
        .await
        .map_err(database_error("update task"))?;

        // Dropping the transaction on conflict rolls it back.
        let version = check_updated(&result, ENTITY, task.id(), task.version())?;

        sqlx::query("DELETE FROM task_assignees WHERE task_id = $1")
            .bind(task.id().value())
            .execute(&mut *tx)
            .await
            .map_err(database_error("delete task assignees"))?;

        insert_assignees(&mut tx, *task.id(), data).await?;

        tx.commit().await.map_err(database_error("commit transaction"))?;

        Ok(Entity::new(*task.id(), version, data.clone()))
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(database_error("start transaction"))?;

        sqlx::query("DELETE FROM task_assignees WHERE task_id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(database_error("delete task assignees"))?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(database_error("delete task"))?;

        tx.commit().await.map_err(database_error("commit transaction"))?;

        if result.rows_affected() == 0 {
            warn!(task_id = %id, "Delete of absent task ignored");
        } else {
            debug!(task_id = %id, "Deleted task");
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_project(&self, project: ProjectId) -> Result<Vec<Task>, RepositoryError> {
        self.fetch_where("t.project_id = $1", project.value()).await
    }

    async fn find_by_assignee(&self, employee: EmployeeId) -> Result<Vec<Task>, RepositoryError> {
        self.fetch_where(
            "t.id IN (SELECT task_id FROM task_assignees WHERE employee_id = $1)",
            employee.value(),
        )
        .await
    }
}
