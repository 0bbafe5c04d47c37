//! Task command handlers.

mod create_task;
mod errors;
mod reassign_task;
mod update_task;

pub use create_task::{CreateTaskCommand, CreateTaskHandler};
pub use errors::TaskCommandError;
pub use reassign_task::{ReassignTaskCommand, ReassignTaskHandler};
pub use update_task::{UpdateTaskCommand, UpdateTaskHandler};
