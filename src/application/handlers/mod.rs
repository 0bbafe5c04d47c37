//! Application handlers.
//!
//! Command handlers that orchestrate domain operations over the ports.

pub mod task;

pub use task::{
    CreateTaskCommand, CreateTaskHandler, ReassignTaskCommand, ReassignTaskHandler,
    TaskCommandError, UpdateTaskCommand, UpdateTaskHandler,
};
