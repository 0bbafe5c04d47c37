//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! Every port extends [`EntityRepository`](crate::domain::foundation::EntityRepository),
//! which supplies versioned `insert`, `find_by_id`, `update` and
//! `delete_by_id`, and adds its aggregate's queries:
//!
//! - `EmployeeRepository` - Employee records
//! - `LocationRepository` - Locations with their postal address
//! - `ProjectRepository` - Projects
//! - `TaskRepository` - Tasks and their assignee collection
//! - `UserRepository` - Application users

mod employee_repository;
mod location_repository;
mod project_repository;
mod task_repository;
mod user_repository;

pub use employee_repository::EmployeeRepository;
pub use location_repository::LocationRepository;
pub use project_repository::ProjectRepository;
pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;
