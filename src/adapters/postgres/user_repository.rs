//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::support::{check_updated, database_error, delete_row};
use crate::domain::foundation::{Entity, EntityRepository, RepositoryError, UserId, Version};
use crate::domain::records::{User, UserData};
use crate::domain::values::{EmailAddress, IpAddress};
use crate::ports::UserRepository;

const ENTITY: &str = "User";
const USERNAME_CONSTRAINT: &str = "users_username_key";

/// PostgreSQL implementation of the UserRepository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    version: i32,
    username: String,
    email: String,
    last_login_ip: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::of(&row.email)?;
        let last_login_ip = row.last_login_ip.as_deref().map(IpAddress::of).transpose()?;
        let data = UserData::new(&row.username, email, last_login_ip)?;
        Ok(Entity::new(UserId::new(row.id)?, Version::new(row.version)?, data))
    }
}

fn write_error<'a>(
    action: &'static str,
    username: &'a str,
) -> impl FnOnce(sqlx::Error) -> RepositoryError + 'a {
    move |e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.constraint() == Some(USERNAME_CONSTRAINT) {
                return RepositoryError::database(format!("Username '{}' is already taken", username));
            }
        }
        database_error(action)(e)
    }
}

#[async_trait]
impl EntityRepository<UserId, UserData> for PostgresUserRepository {
    async fn insert(&self, data: UserData) -> Result<User, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (version, username, email, last_login_ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Version::INITIAL.value())
        .bind(data.username())
        .bind(data.email().as_str())
        .bind(data.last_login_ip().map(|ip| ip.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("insert user", data.username()))?;

        debug!(user_id = id, "Inserted user");
        Ok(Entity::new(UserId::new(id)?, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, version, username, email, last_login_ip FROM users WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("fetch user"))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let data = user.data();
        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = $3,
                email = $4,
                last_login_ip = $5,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(user.id().value())
        .bind(user.version().value())
        .bind(data.username())
        .bind(data.email().as_str())
        .bind(data.last_login_ip().map(|ip| ip.as_str()))
        .execute(&self.pool)
        .await
        .map_err(write_error("update user", data.username()))?;

        let version = check_updated(&result, ENTITY, user.id(), user.version())?;
        Ok(Entity::new(*user.id(), version, data.clone()))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), RepositoryError> {
        delete_row(&self.pool, "users", id.value()).await
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, version, username, email, last_login_ip FROM users WHERE username = $1",
        )
        .bind(username.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("fetch user"))?;

        row.map(User::try_from).transpose()
    }
}
