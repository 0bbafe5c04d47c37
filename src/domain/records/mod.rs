//! Business record aggregates.
//!
//! Each aggregate is an [`Entity`](crate::domain::foundation::Entity) over a
//! `*Data` payload holding its mutable business fields. Payloads are built
//! through validating constructors and changed through `with_*` methods that
//! return new values.

mod employee;
mod location;
mod project;
mod task;
mod user;

pub use employee::{Employee, EmployeeData};
pub use location::{Location, LocationData, LocationFacility};
pub use project::{Project, ProjectData};
pub use task::{Task, TaskData, TaskStatus};
pub use user::{User, UserData};
