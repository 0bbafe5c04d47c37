//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to storage:
//! - `memory` - In-memory repositories for tests and local development
//! - `postgres` - PostgreSQL repositories (sqlx)

pub mod memory;
pub mod postgres;

pub use memory::{
    InMemoryEmployeeRepository, InMemoryEntityRepository, InMemoryLocationRepository,
    InMemoryProjectRepository, InMemoryTaskRepository, InMemoryUserRepository,
};
pub use postgres::{
    PostgresEmployeeRepository, PostgresLocationRepository,
    PostgresProjectRepository, PostgresTaskRepository, PostgresUserRepository,
};
