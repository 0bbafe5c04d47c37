//! Employee repository port.

use async_trait::async_trait;

use crate::domain::foundation::{EmployeeId, EntityRepository, RepositoryError};
use crate::domain::records::{Employee, EmployeeData};

/// Repository port for Employee aggregates.
#[async_trait]
pub trait EmployeeRepository: EntityRepository<EmployeeId, EmployeeData> {
    /// Every employee, ordered by id.
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EmployeeRepository) {}
    }
}
