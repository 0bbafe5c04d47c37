//! Strongly-typed identifier value objects.
//!
//! Each aggregate kind gets its own identifier type wrapping a non-negative
//! 64-bit integer. The wrappers share a representation but never convert into
//! one another, so an `EmployeeId` can not be passed where a `TaskId` is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Generates a sequence-backed identifier newtype.
///
/// The generated type validates non-negativity on construction, serializes as
/// a bare JSON number and orders by its wrapped value.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier, rejecting negative values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value < 0 {
                    return Err(ValidationError::out_of_range(
                        stringify!($name),
                        0,
                        i64::MAX,
                        value,
                    ));
                }
                Ok(Self(value))
            }

            /// Returns the wrapped value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format(stringify!($name), s))?;
                Self::new(value)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for an employee.
    EmployeeId
);

entity_id!(
    /// Unique identifier for a location.
    LocationId
);

entity_id!(
    /// Unique identifier for a project.
    ProjectId
);

entity_id!(
    /// Unique identifier for a task.
    TaskId
);

entity_id!(
    /// Unique identifier for an application user.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_accepts_zero_and_positive_values() {
        assert_eq!(EmployeeId::new(0).unwrap().value(), 0);
        assert_eq!(EmployeeId::new(42).unwrap().value(), 42);
    }

    #[test]
    fn id_rejects_negative_values() {
        let result = TaskId::new(-1);
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn ids_equal_and_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(ProjectId::new(7).unwrap());
        set.insert(ProjectId::new(7).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn id_displays_wrapped_value() {
        assert_eq!(LocationId::new(12).unwrap().to_string(), "12");
    }

    #[test]
    fn id_parses_from_string() {
        let id: UserId = "15".parse().unwrap();
        assert_eq!(id.value(), 15);
        assert!("abc".parse::<UserId>().is_err());
        assert!("-3".parse::<UserId>().is_err());
    }

    #[test]
    fn id_serializes_as_number() {
        let id = EmployeeId::new(5).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "5");
    }

    #[test]
    fn id_deserialization_rejects_negative() {
        assert!(serde_json::from_str::<EmployeeId>("-5").is_err());
        let id: EmployeeId = serde_json::from_str("9").unwrap();
        assert_eq!(id.value(), 9);
    }
}
