//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresEmployeeRepository` - Employee rows
//! - `PostgresLocationRepository` - Locations with JSONB address and facility
//! - `PostgresProjectRepository` - Project rows
//! - `PostgresTaskRepository` - Tasks plus the `task_assignees` association
//! - `PostgresUserRepository` - Application users
//!
//! Every table has a `version` column. Updates are a single conditional
//! statement (`... SET version = version + 1 WHERE id = $1 AND version = $2`)
//! and zero affected rows means the caller's snapshot is stale.
//!
//! The adapters expect the tables to exist; schema management lives outside
//! this crate.

mod employee_repository;
mod location_repository;
mod project_repository;
mod support;
mod task_repository;
mod user_repository;

pub use employee_repository::PostgresEmployeeRepository;
pub use location_repository::PostgresLocationRepository;
pub use project_repository::PostgresProjectRepository;
pub use task_repository::PostgresTaskRepository;
pub use user_repository::PostgresUserRepository;
