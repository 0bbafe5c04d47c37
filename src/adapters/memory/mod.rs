//! In-memory repository adapters.
//!
//! Implementations of the repository ports backed by process memory, used by
//! tests and local development. Each write runs under a single lock, which
//! makes the version compare-and-swap atomic the same way a conditional
//! `UPDATE ... WHERE version = $v` is atomic in the database.
//!
//! ## Available Adapters
//!
//! - **InMemoryEntityRepository** - Generic versioned store (employees,
//!   locations, projects, users)
//! - **InMemoryTaskRepository** - Tasks with a separate assignee association
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::memory::{InMemoryEmployeeRepository, InMemoryTaskRepository};
//!
//! let employees = InMemoryEmployeeRepository::new("Employee");
//! let tasks = InMemoryTaskRepository::new();
//! ```

mod entity_repository;
mod task_repository;

pub use entity_repository::{
    InMemoryEmployeeRepository, InMemoryEntityRepository, InMemoryLocationRepository,
    InMemoryProjectRepository, InMemoryUserRepository,
};
pub use task_repository::InMemoryTaskRepository;
