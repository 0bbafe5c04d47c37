//! In-memory task repository.
//!
//! Task rows and the `(task, employee)` assignee association are held in
//! separate collections, mirroring the `tasks` / `task_assignees` tables.
//! Reads join them; `update` replaces a task's association rows wholesale
//! while still holding the write lock taken for the version check.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::foundation::{
    EmployeeId, Entity, EntityRepository, ProjectId, RepositoryError, TaskId, Version,
};
use crate::domain::records::{Task, TaskData};
use crate::ports::TaskRepository;

const ENTITY: &str = "Task";

#[derive(Debug, Default)]
struct TaskTables {
    next_id: i64,
    /// Task rows, stored with an empty assignee set.
    tasks: BTreeMap<TaskId, (Version, TaskData)>,
    task_assignees: Vec<(TaskId, EmployeeId)>,
}

impl TaskTables {
    fn load(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(&id).map(|(version, row)| {
            let assignees = self
                .task_assignees
                .iter()
                .filter(|(task, _)| *task == id)
                .map(|(_, employee)| *employee);
            Entity::new(id, *version, row.clone().with_assignees(assignees))
        })
    }

    fn replace_assignees(&mut self, id: TaskId, data: &TaskData) {
        self.task_assignees.retain(|(task, _)| *task != id);
        self.task_assignees
            .extend(data.assignees().iter().map(|employee| (id, *employee)));
    }

    fn load_where<F>(&self, predicate: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool,
    {
        self.tasks
            .keys()
            .filter_map(|id| self.load(*id))
            .filter(|task| predicate(task))
            .collect()
    }
}

/// In-memory implementation of [`TaskRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    tables: Arc<RwLock<TaskTables>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(TaskTables {
                next_id: 1,
                ..TaskTables::default()
            })),
        }
    }

    /// Number of association rows for `task` (useful for tests).
    pub async fn assignee_row_count(&self, task: TaskId) -> usize {
        self.tables
            .read()
            .await
            .task_assignees
            .iter()
            .filter(|(id, _)| *id == task)
            .count()
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityRepository<TaskId, TaskData> for InMemoryTaskRepository {
    async fn insert(&self, data: TaskData) -> Result<Task, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = TaskId::new(tables.next_id)?;
        tables.next_id += 1;

        let row = data.clone().with_assignees([]);
        tables.tasks.insert(id, (Version::INITIAL, row));
        tables.replace_assignees(id, &data);

        debug!(task_id = %id, assignees = data.assignees().len(), "Inserted task");
        Ok(Entity::new(id, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        Ok(self.tables.read().await.load(id))
    }

    async fn update(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut tables = self.tables.write().await;
        let id = *task.id();

        let next = match tables.tasks.get_mut(&id) {
            Some((stored, row)) if *stored == task.version() => {
                *stored = stored.next()?;
                *row = task.data().clone().with_assignees([]);
                *stored
            }
            _ => {
                warn!(task_id = %id, version = %task.version(), "Optimistic locking failure");
                return Err(RepositoryError::optimistic_locking(ENTITY, id, task.version()));
            }
        };
        tables.replace_assignees(id, task.data());

        debug!(task_id = %id, version = %next, "Updated task");
        Ok(Entity::new(id, next, task.data().clone()))
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.tasks.remove(&id).is_some() {
            tables.task_assignees.retain(|(task, _)| *task != id);
            debug!(task_id = %id, "Deleted task");
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_project(&self, project: ProjectId) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .load_where(|task| task.data().project() == project))
    }

    async fn find_by_assignee(&self, employee: EmployeeId) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .tables
            .read()
            .await
            .load_where(|task| task.data().is_assigned_to(employee)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::TaskStatus;

    fn employee(id: i64) -> EmployeeId {
        EmployeeId::new(id).unwrap()
    }

    fn task(assignees: &[i64]) -> TaskData {
        TaskData::new(
            ProjectId::new(1).unwrap(),
            "Ship it",
            None,
            TaskStatus::Open,
            None,
            assignees.iter().map(|id| employee(*id)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_returns_assignees() {
        let repo = InMemoryTaskRepository::new();
        let inserted = repo.insert(task(&[1, 2])).await.unwrap();

        let found = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();

        assert_eq!(found.version(), Version::INITIAL);
        assert_eq!(found.data(), inserted.data());
        assert_eq!(repo.assignee_row_count(*inserted.id()).await, 2);
    }

    #[tokio::test]
    async fn update_replaces_assignees_entirely() {
        let repo = InMemoryTaskRepository::new();
        let inserted = repo.insert(task(&[1, 2])).await.unwrap();

        let edited = inserted.with_data(inserted.data().clone().with_assignees([employee(3)]));
        let updated = repo.update(&edited).await.unwrap();

        assert_eq!(updated.version().value(), 2);
        let found = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();
        assert_eq!(
            found.data().assignees().iter().copied().collect::<Vec<_>>(),
            vec![employee(3)]
        );
        assert_eq!(repo.assignee_row_count(*inserted.id()).await, 1);
    }

    #[tokio::test]
    async fn stale_update_leaves_assignees_untouched() {
        let repo = InMemoryTaskRepository::new();
        let inserted = repo.insert(task(&[1])).await.unwrap();
        repo.update(&inserted.with_data(task(&[2]))).await.unwrap();

        let err = repo.update(&inserted.with_data(task(&[3]))).await.unwrap_err();

        assert!(err.is_conflict());
        let found = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();
        assert!(found.data().is_assigned_to(employee(2)));
        assert!(!found.data().is_assigned_to(employee(3)));
    }

    #[tokio::test]
    async fn delete_removes_association_rows() {
        let repo = InMemoryTaskRepository::new();
        let inserted = repo.insert(task(&[1, 2])).await.unwrap();

        repo.delete_by_id(*inserted.id()).await.unwrap();

        assert!(repo.find_by_id(*inserted.id()).await.unwrap().is_none());
        assert_eq!(repo.assignee_row_count(*inserted.id()).await, 0);
        assert!(repo.find_by_assignee(employee(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn finds_by_assignee_and_project() {
        let repo = InMemoryTaskRepository::new();
        repo.insert(task(&[1])).await.unwrap();
        repo.insert(task(&[1, 2])).await.unwrap();

        assert_eq!(repo.find_by_assignee(employee(1)).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_assignee(employee(2)).await.unwrap().len(), 1);
        assert_eq!(
            repo.find_by_project(ProjectId::new(1).unwrap()).await.unwrap().len(),
            2
        );
        assert!(repo
            .find_by_project(ProjectId::new(2).unwrap())
            .await
            .unwrap()
            .is_empty());
    }
}
