//! Generic in-memory versioned repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::address::Address;
use crate::domain::foundation::{
    EmployeeId, Entity, EntityRepository, LocationId, ProjectId, RepositoryError, UserId,
    ValidationError, Version,
};
use crate::domain::records::{
    Employee, EmployeeData, Location, LocationData, Project, ProjectData, User, UserData,
};
use crate::ports::{EmployeeRepository, LocationRepository, ProjectRepository, UserRepository};

#[derive(Debug)]
struct Table<I, D> {
    next_id: i64,
    rows: BTreeMap<I, (Version, D)>,
}

/// In-memory store for any aggregate whose data has no dependent collection.
///
/// Identifiers come from a per-repository sequence starting at 1.
#[derive(Debug, Clone)]
pub struct InMemoryEntityRepository<I, D> {
    entity: &'static str,
    table: Arc<RwLock<Table<I, D>>>,
}

pub type InMemoryEmployeeRepository = InMemoryEntityRepository<EmployeeId, EmployeeData>;
pub type InMemoryLocationRepository = InMemoryEntityRepository<LocationId, LocationData>;
pub type InMemoryProjectRepository = InMemoryEntityRepository<ProjectId, ProjectData>;
pub type InMemoryUserRepository = InMemoryEntityRepository<UserId, UserData>;

impl<I, D> InMemoryEntityRepository<I, D>
where
    I: Copy + Ord + TryFrom<i64, Error = ValidationError>,
    D: Clone,
{
    /// Creates an empty repository; `entity` names the aggregate in errors
    /// and logs.
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            table: Arc::new(RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }

    /// Number of stored rows (useful for tests).
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Snapshots matching `predicate`, ordered by id.
    pub async fn find_where<F>(&self, predicate: F) -> Vec<Entity<I, D>>
    where
        F: Fn(&D) -> bool,
    {
        self.table
            .read()
            .await
            .rows
            .iter()
            .filter(|(_, (_, data))| predicate(data))
            .map(|(id, (version, data))| Entity::new(*id, *version, data.clone()))
            .collect()
    }
}

#[async_trait]
impl<I, D> EntityRepository<I, D> for InMemoryEntityRepository<I, D>
where
    I: Copy + Ord + Display + Debug + Send + Sync + TryFrom<i64, Error = ValidationError> + 'static,
    D: Clone + Send + Sync + 'static,
{
    async fn insert(&self, data: D) -> Result<Entity<I, D>, RepositoryError> {
        let mut table = self.table.write().await;
        let id = I::try_from(table.next_id)?;
        table.next_id += 1;
        table.rows.insert(id, (Version::INITIAL, data.clone()));

        debug!(entity = self.entity, %id, "Inserted row");
        Ok(Entity::new(id, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: I) -> Result<Option<Entity<I, D>>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .map(|(version, data)| Entity::new(id, *version, data.clone())))
    }

    async fn update(&self, entity: &Entity<I, D>) -> Result<Entity<I, D>, RepositoryError> {
        let mut table = self.table.write().await;
        let id = *entity.id();

        match table.rows.get_mut(&id) {
            Some((stored, data)) if *stored == entity.version() => {
                *stored = stored.next()?;
                *data = entity.data().clone();
                debug!(entity = self.entity, %id, version = %stored, "Updated row");
                Ok(Entity::new(id, *stored, data.clone()))
            }
            _ => {
                warn!(
                    entity = self.entity,
                    %id,
                    version = %entity.version(),
                    "Optimistic locking failure"
                );
                Err(RepositoryError::optimistic_locking(
                    self.entity,
                    id,
                    entity.version(),
                ))
            }
        }
    }

    async fn delete_by_id(&self, id: I) -> Result<(), RepositoryError> {
        if self.table.write().await.rows.remove(&id).is_some() {
            debug!(entity = self.entity, %id, "Deleted row");
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.find_where(|_| true).await)
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find_by_country(&self, iso_code: &str) -> Result<Vec<Location>, RepositoryError> {
        let code = iso_code.trim().to_ascii_uppercase();
        Ok(self
            .find_where(|data| data.address().country().iso_code() == code)
            .await)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_location(&self, location: LocationId) -> Result<Vec<Project>, RepositoryError> {
        Ok(self
            .find_where(|data| data.location() == Some(location))
            .await)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let wanted = username.trim().to_lowercase();
        Ok(self
            .find_where(|data| data.username() == wanted)
            .await
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::PostalAddress;
    use crate::domain::records::LocationFacility;
    use crate::domain::values::{Country, EmailAddress};

    fn employee(first: &str) -> EmployeeData {
        EmployeeData::new(first, "Smith", None, None, None).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_at_version_one() {
        let repo = InMemoryEmployeeRepository::new("Employee");

        let a = repo.insert(employee("Ann")).await.unwrap();
        let b = repo.insert(employee("Bob")).await.unwrap();

        assert_eq!(a.id().value(), 1);
        assert_eq!(b.id().value(), 2);
        assert_eq!(a.version(), Version::INITIAL);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn update_bumps_version_and_persists_data() {
        let repo = InMemoryEmployeeRepository::new("Employee");
        let inserted = repo.insert(employee("Ann")).await.unwrap();

        let updated = repo
            .update(&inserted.with_data(employee("Anne")))
            .await
            .unwrap();

        assert_eq!(updated.version().value(), 2);
        let found = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();
        assert_eq!(found.data().first_name(), "Anne");
        assert_eq!(found.version().value(), 2);
    }

    #[tokio::test]
    async fn stale_update_fails_without_writing() {
        let repo = InMemoryEmployeeRepository::new("Employee");
        let inserted = repo.insert(employee("Ann")).await.unwrap();
        repo.update(&inserted.with_data(employee("Anne"))).await.unwrap();

        let err = repo
            .update(&inserted.with_data(employee("Annie")))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        let found = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();
        assert_eq!(found.data().first_name(), "Anne");
    }

    #[tokio::test]
    async fn update_at_max_version_fails_without_writing() {
        let repo = InMemoryEmployeeRepository::new("Employee");
        let inserted = repo.insert(employee("Ann")).await.unwrap();
        let max = Version::new(i32::MAX).unwrap();
        if let Some((stored, _)) = repo.table.write().await.rows.get_mut(inserted.id()) {
            *stored = max;
        }
        let at_max = Entity::new(*inserted.id(), max, employee("Ann"));

        let err = repo.update(&at_max.with_data(employee("Anne"))).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Validation(ValidationError::OutOfRange { .. })));
        let found = repo.find_by_id(*inserted.id()).await.unwrap().unwrap();
        assert_eq!(found.version(), max);
        assert_eq!(found.data().first_name(), "Ann");
    }

    #[tokio::test]
    async fn update_after_delete_is_a_conflict() {
        let repo = InMemoryEmployeeRepository::new("Employee");
        let inserted = repo.insert(employee("Ann")).await.unwrap();
        repo.delete_by_id(*inserted.id()).await.unwrap();

        let err = repo.update(&inserted).await.unwrap_err();
        assert!(matches!(err, RepositoryError::OptimisticLockingFailure { .. }));
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_a_no_op() {
        let repo = InMemoryEmployeeRepository::new("Employee");
        assert!(repo.delete_by_id(EmployeeId::new(99).unwrap()).await.is_ok());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn find_by_country_matches_iso_code() {
        let repo = InMemoryLocationRepository::new("Location");
        let office = |code: &str| {
            LocationData::new(
                format!("{} office", code),
                PostalAddress::empty_for_country(Country::of(code).unwrap()),
                LocationFacility::Office,
            )
            .unwrap()
        };
        repo.insert(office("FI")).await.unwrap();
        repo.insert(office("DE")).await.unwrap();

        let found = repo.find_by_country("fi").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data().name(), "FI office");
    }

    #[tokio::test]
    async fn find_by_username_is_case_insensitive() {
        let repo = InMemoryUserRepository::new("User");
        let email = EmailAddress::of("root@example.com").unwrap();
        repo.insert(UserData::new("root", email, None).unwrap())
            .await
            .unwrap();

        assert!(repo.find_by_username("ROOT").await.unwrap().is_some());
        assert!(repo.find_by_username("admin").await.unwrap().is_none());
    }
}
