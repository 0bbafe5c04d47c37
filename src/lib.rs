//! Business Records - Versioned persistence for employees, locations,
//! projects, tasks and users.
//!
//! The crate is organised hexagonally:
//! - `domain` - Value objects, postal addresses and the record aggregates
//! - `ports` - Repository traits
//! - `adapters` - In-memory and PostgreSQL implementations of the ports
//! - `application` - Command handlers built on the ports
//! - `config` - Environment-driven configuration and tracing setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
