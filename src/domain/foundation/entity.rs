//! Versioned entity snapshots.
//!
//! An [`Entity`] is an immutable `(id, version, data)` triple. Equality and
//! hashing look at the identifier only, so a locally edited snapshot still
//! compares equal to the stored one it was derived from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::ValidationError;

/// Optimistic-concurrency version stamp. Starts at 1 on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Version(i32);

impl Version {
    /// Version assigned to a freshly inserted row.
    pub const INITIAL: Self = Self(1);

    /// Creates a version, rejecting values below 1.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::out_of_range(
                "version",
                1,
                i64::from(i32::MAX),
                i64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the version that follows this one. A row at `i32::MAX` can
    /// no longer be updated.
    pub fn next(&self) -> Result<Self, ValidationError> {
        self.0.checked_add(1).map(Self).ok_or_else(|| {
            ValidationError::out_of_range(
                "version",
                1,
                i64::from(i32::MAX),
                i64::from(self.0) + 1,
            )
        })
    }

    /// Returns the raw value.
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Version {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Version> for i32 {
    fn from(version: Version) -> i32 {
        version.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Immutable snapshot of a stored aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity<I, D> {
    id: I,
    version: Version,
    data: D,
}

impl<I, D> Entity<I, D> {
    /// Assembles a snapshot. Repositories call this after reading or writing
    /// a row; callers normally obtain entities from a repository.
    pub fn new(id: I, version: Version, data: D) -> Self {
        Self { id, version, data }
    }

    pub fn id(&self) -> &I {
        &self.id
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    /// Consumes the snapshot, returning its data.
    pub fn into_data(self) -> D {
        self.data
    }

    /// Returns a copy with the data replaced. Id and version are kept; the
    /// repository bumps the version when the change is persisted.
    pub fn with_data(&self, data: D) -> Self
    where
        I: Clone,
    {
        Self {
            id: self.id.clone(),
            version: self.version,
            data,
        }
    }
}

impl<I: PartialEq, D> PartialEq for Entity<I, D> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<I: Eq, D> Eq for Entity<I, D> {}

impl<I: Hash, D> Hash for Entity<I, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TaskId;
    use std::collections::HashSet;

    fn task_id(n: i64) -> TaskId {
        TaskId::new(n).unwrap()
    }

    #[test]
    fn version_starts_at_one_and_increments() {
        assert_eq!(Version::INITIAL.value(), 1);
        assert_eq!(Version::INITIAL.next().unwrap().value(), 2);
    }

    #[test]
    fn version_does_not_wrap_or_stick_at_max() {
        let err = Version::new(i32::MAX).unwrap().next().unwrap_err();
        assert_eq!(
            err,
            ValidationError::out_of_range("version", 1, i64::from(i32::MAX), 1 << 31)
        );
    }

    #[test]
    fn version_rejects_zero() {
        assert!(Version::new(0).is_err());
    }

    #[test]
    fn with_data_keeps_id_and_version() {
        let entity = Entity::new(task_id(1), Version::new(3).unwrap(), "old");
        let edited = entity.with_data("new");

        assert_eq!(edited.id(), entity.id());
        assert_eq!(edited.version(), entity.version());
        assert_eq!(*edited.data(), "new");
        assert_eq!(*entity.data(), "old");
    }

    #[test]
    fn entities_with_same_id_are_equal_regardless_of_version_and_data() {
        let a = Entity::new(task_id(1), Version::INITIAL, "a");
        let b = Entity::new(task_id(1), Version::new(5).unwrap(), "b");
        assert_eq!(a, b);
    }

    #[test]
    fn entities_with_different_ids_are_not_equal() {
        let a = Entity::new(task_id(1), Version::INITIAL, "same");
        let b = Entity::new(task_id(2), Version::INITIAL, "same");
        assert_ne!(a, b);
    }

    #[test]
    fn entities_hash_by_id() {
        let mut set = HashSet::new();
        set.insert(Entity::new(task_id(1), Version::INITIAL, "a"));
        set.insert(Entity::new(task_id(1), Version::new(2).unwrap(), "b"));
        assert_eq!(set.len(), 1);
    }
}
