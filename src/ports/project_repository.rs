//! Project repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EntityRepository, LocationId, ProjectId, RepositoryError};
use crate::domain::records::{Project, ProjectData};

/// Repository port for Project aggregates.
#[async_trait]
pub trait ProjectRepository: EntityRepository<ProjectId, ProjectData> {
    /// Projects run from the given location.
    async fn find_by_location(&self, location: LocationId) -> Result<Vec<Project>, RepositoryError>;
}
