//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers never retry on `OptimisticLockingFailure`; the caller decides
//! whether to re-read and try again.

pub mod handlers;

pub use handlers::{
    CreateTaskCommand, CreateTaskHandler, ReassignTaskCommand, ReassignTaskHandler,
    TaskCommandError, UpdateTaskCommand, UpdateTaskHandler,
};
