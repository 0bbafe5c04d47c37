//! Versioned repository contract shared by every aggregate.
//!
//! This module provides the generic `EntityRepository<I, D>` trait that every
//! aggregate repository extends, plus the `RepositoryError` taxonomy.
//!
//! # Lifecycle
//!
//! ```text
//! Absent --insert--> Active(v1) --update(v)--> Active(v+1) --delete_by_id--> Absent
//! ```
//!
//! `update` is a compare-and-swap on the version: it succeeds only when the
//! caller's snapshot carries the stored version, otherwise it fails with
//! `OptimisticLockingFailure` and writes nothing. Dependent collections are
//! replaced wholesale in the same unit of work.
//!
//! # Example
//!
//! ```ignore
//! let task = repo.insert(data).await?;           // version 1
//! let edited = task.with_data(new_data);
//! let task = repo.update(&edited).await?;        // version 2
//! repo.update(&edited).await;                    // Err(OptimisticLockingFailure)
//! ```

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use thiserror::Error;

use super::{DomainError, Entity, ErrorCode, ValidationError, Version};

/// Errors raised by repository implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The caller's version is stale: the row was modified or deleted since
    /// it was read.
    #[error("{entity} {id} was modified concurrently (expected {version})")]
    OptimisticLockingFailure {
        entity: &'static str,
        id: String,
        version: Version,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A stored row no longer satisfies a value-object rule.
    #[error("Stored data is invalid: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    /// Creates an optimistic locking failure for the given row.
    pub fn optimistic_locking(entity: &'static str, id: impl Display, version: Version) -> Self {
        Self::OptimisticLockingFailure {
            entity,
            id: id.to_string(),
            version,
        }
    }

    /// Creates a not-found error for the given row.
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Whether the caller should re-read and retry (or report a conflict).
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::OptimisticLockingFailure { .. })
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::OptimisticLockingFailure { entity, id, version } => DomainError::new(
                ErrorCode::OptimisticLockingFailure,
                format!("{} {} was modified concurrently", entity, id),
            )
            .with_detail("entity", entity)
            .with_detail("id", id)
            .with_detail("version", version.value().to_string()),
            RepositoryError::NotFound { entity, id } => {
                DomainError::new(not_found_code(entity), format!("{} {} not found", entity, id))
                    .with_detail("id", id)
            }
            RepositoryError::Validation(e) => e.into(),
            RepositoryError::Serialization(msg) => {
                DomainError::new(ErrorCode::SerializationError, msg)
            }
            RepositoryError::Database(msg) => DomainError::new(ErrorCode::DatabaseError, msg),
        }
    }
}

fn not_found_code(entity: &str) -> ErrorCode {
    match entity {
        "Employee" => ErrorCode::EmployeeNotFound,
        "Location" => ErrorCode::LocationNotFound,
        "Project" => ErrorCode::ProjectNotFound,
        "Task" => ErrorCode::TaskNotFound,
        "User" => ErrorCode::UserNotFound,
        _ => ErrorCode::InternalError,
    }
}

/// Base trait for versioned aggregate repositories.
///
/// # Type Parameters
///
/// - `I`: The identifier type (e.g., `TaskId`)
/// - `D`: The data payload holding every mutable business field
///
/// # Error Handling
///
/// `OptimisticLockingFailure` propagates unmodified; implementations never
/// retry on the caller's behalf.
#[async_trait]
pub trait EntityRepository<I, D>: Send + Sync
where
    I: Send + Sync + Debug + 'static,
    D: Send + Sync + 'static,
{
    /// Persists a new aggregate with a freshly assigned id at version 1,
    /// including any dependent-collection rows.
    async fn insert(&self, data: D) -> Result<Entity<I, D>, RepositoryError>;

    /// Finds the current snapshot. The row and its dependent collection are
    /// read as one unit.
    ///
    /// Returns `Ok(None)` if the aggregate doesn't exist.
    async fn find_by_id(&self, id: I) -> Result<Option<Entity<I, D>>, RepositoryError>;

    /// Persists `entity.data()` if the stored version equals
    /// `entity.version()`, returning the snapshot at the next version.
    ///
    /// # Errors
    ///
    /// - `OptimisticLockingFailure` if the version is stale or the row is gone
    /// - `Database` on infrastructure failure
    async fn update(&self, entity: &Entity<I, D>) -> Result<Entity<I, D>, RepositoryError>;

    /// Removes the aggregate and its dependent rows. Deleting an absent id is
    /// a no-op.
    async fn delete_by_id(&self, id: I) -> Result<(), RepositoryError>;

    /// Checks if an aggregate with the given ID exists.
    ///
    /// Default implementation uses `find_by_id`. Override if a more
    /// efficient existence check is available (e.g., COUNT query).
    async fn exists(&self, id: I) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
