//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Identifiers, versioned entities, the repository contract, errors
//! - `values` - Validated value objects (postal codes, phone, e-mail, IP, country)
//! - `address` - Polymorphic postal address and its JSON codec
//! - `records` - Employee, location, project, task and user aggregates

pub mod address;
pub mod foundation;
pub mod records;
pub mod values;
