//! Helpers shared by the PostgreSQL repositories.

use sqlx::postgres::PgQueryResult;
use sqlx::PgPool;
use std::fmt::Display;
use tracing::{debug, warn};

use crate::domain::address::codec::AddressCodecError;
use crate::domain::foundation::{RepositoryError, Version};

/// Maps a sqlx error to `RepositoryError::Database`, prefixed with what was
/// being attempted.
pub(super) fn database_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| RepositoryError::database(format!("Failed to {}: {}", action, e))
}

pub(super) fn address_error(err: AddressCodecError) -> RepositoryError {
    match err {
        AddressCodecError::Validation(e) => RepositoryError::Validation(e),
        AddressCodecError::Malformed(msg) => RepositoryError::serialization(msg),
    }
}

pub(super) fn json_error(err: serde_json::Error) -> RepositoryError {
    RepositoryError::serialization(err.to_string())
}

/// Turns the result of a conditional update into the stored version.
///
/// Zero affected rows means the row was changed or deleted since `version`
/// was read.
pub(super) fn check_updated(
    result: &PgQueryResult,
    entity: &'static str,
    id: impl Display,
    version: Version,
) -> Result<Version, RepositoryError> {
    if result.rows_affected() == 0 {
        warn!(entity, %id, %version, "Optimistic locking failure");
        return Err(RepositoryError::optimistic_locking(entity, id, version));
    }
    let next = version.next()?;
    debug!(entity, %id, version = %next, "Updated row");
    Ok(next)
}

/// Deletes one row by id. Absent rows are not an error.
pub(super) async fn delete_row(
    pool: &PgPool,
    table: &'static str,
    id: i64,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
        .bind(id)
        .execute(pool)
        .await
        .map_err(database_error("delete row"))?;

    if result.rows_affected() > 0 {
        debug!(table, id, "Deleted row");
    }
    Ok(())
}
