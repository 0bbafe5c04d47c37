//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the versioned entity snapshot, the repository
//! contract, text helpers and error types that every aggregate builds on.

mod entity;
mod errors;
mod ids;
mod repository;
mod text;

pub use entity::{Entity, Version};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EmployeeId, LocationId, ProjectId, TaskId, UserId};
pub use repository::{EntityRepository, RepositoryError};
pub use text::{optional_text, required_text, MAX_TEXT_LENGTH};
