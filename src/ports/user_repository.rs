//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EntityRepository, RepositoryError, UserId};
use crate::domain::records::{User, UserData};

/// Repository port for User aggregates.
#[async_trait]
pub trait UserRepository: EntityRepository<UserId, UserData> {
    /// Finds a user by (lower-cased) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}
