//! PostgreSQL implementation of ProjectRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::support::{check_updated, database_error, delete_row};
use crate::domain::foundation::{
    Entity, EntityRepository, LocationId, ProjectId, RepositoryError, Version,
};
use crate::domain::records::{Project, ProjectData};
use crate::ports::ProjectRepository;

const ENTITY: &str = "Project";

/// PostgreSQL implementation of the ProjectRepository port.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    version: i32,
    name: String,
    description: Option<String>,
    location_id: Option<i64>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let location = row.location_id.map(LocationId::new).transpose()?;
        let data = ProjectData::new(row.name, row.description, location)?;
        Ok(Entity::new(ProjectId::new(row.id)?, Version::new(row.version)?, data))
    }
}

#[async_trait]
impl EntityRepository<ProjectId, ProjectData> for PostgresProjectRepository {
    async fn insert(&self, data: ProjectData) -> Result<Project, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO projects (version, name, description, location_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Version::INITIAL.value())
        .bind(data.name())
        .bind(data.description())
        .bind(data.location().map(|l| l.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("insert project"))?;

        debug!(project_id = id, "Inserted project");
        Ok(Entity::new(ProjectId::new(id)?, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            "SELECT id, version, name, description, location_id FROM projects WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("fetch project"))?;

        row.map(Project::try_from).transpose()
    }

    async fn update(&self, project: &Project) -> Result<Project, RepositoryError> {
        let data = project.data();
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                name = $3,
                description = $4,
                location_id = $5,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(project.id().value())
        .bind(project.version().value())
        .bind(data.name())
        .bind(data.description())
        .bind(data.location().map(|l| l.value()))
        .execute(&self.pool)
        .await
        .map_err(database_error("update project"))?;

        let version = check_updated(&result, ENTITY, project.id(), project.version())?;
        Ok(Entity::new(*project.id(), version, data.clone()))
    }

    async fn delete_by_id(&self, id: ProjectId) -> Result<(), RepositoryError> {
        delete_row(&self.pool, "projects", id.value()).await
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_location(&self, location: LocationId) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, version, name, description, location_id
            FROM projects
            WHERE location_id = $1
            ORDER BY id
            "#,
        )
        .bind(location.value())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("fetch projects"))?;

        rows.into_iter().map(Project::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_row_with_location() {
        let project = Project::try_from(ProjectRow {
            id: 4,
            version: 2,
            name: "Migration".into(),
            description: Some("  ".into()),
            location_id: Some(9),
        })
        .unwrap();

        assert_eq!(project.data().location(), Some(LocationId::new(9).unwrap()));
        assert_eq!(project.data().description(), None);
    }

    #[test]
    fn rejects_row_with_negative_location_id() {
        let result = Project::try_from(ProjectRow {
            id: 4,
            version: 1,
            name: "Migration".into(),
            description: None,
            location_id: Some(-1),
        });
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }
}
