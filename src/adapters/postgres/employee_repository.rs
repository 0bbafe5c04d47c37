//! PostgreSQL implementation of EmployeeRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use super::support::{check_updated, database_error, delete_row};
use crate::domain::foundation::{
    EmployeeId, Entity, EntityRepository, RepositoryError, Version,
};
use crate::domain::records::{Employee, EmployeeData};
use crate::domain::values::{EmailAddress, PhoneNumber};
use crate::ports::EmployeeRepository;

const ENTITY: &str = "Employee";

/// PostgreSQL implementation of the EmployeeRepository port.
#[derive(Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an employee.
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    version: i32,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    hire_date: Option<NaiveDate>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RepositoryError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let email = row.email.as_deref().map(EmailAddress::of).transpose()?;
        let phone = row.phone.as_deref().map(PhoneNumber::of).transpose()?;
        let data = EmployeeData::new(row.first_name, row.last_name, email, phone, row.hire_date)?;
        Ok(Entity::new(EmployeeId::new(row.id)?, Version::new(row.version)?, data))
    }
}

#[async_trait]
impl EntityRepository<EmployeeId, EmployeeData> for PostgresEmployeeRepository {
    async fn insert(&self, data: EmployeeData) -> Result<Employee, RepositoryError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO employees (version, first_name, last_name, email, phone, hire_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Version::INITIAL.value())
        .bind(data.first_name())
        .bind(data.last_name())
        .bind(data.email().map(|e| e.as_str()))
        .bind(data.phone().map(|p| p.as_str()))
        .bind(data.hire_date())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("insert employee"))?;

        debug!(employee_id = id, "Inserted employee");
        Ok(Entity::new(EmployeeId::new(id)?, Version::INITIAL, data))
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, version, first_name, last_name, email, phone, hire_date
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("fetch employee"))?;

        row.map(Employee::try_from).transpose()
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, RepositoryError> {
        let data = employee.data();
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                first_name = $3,
                last_name = $4,
                email = $5,
                phone = $6,
                hire_date = $7,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(employee.id().value())
        .bind(employee.version().value())
        .bind(data.first_name())
        .bind(data.last_name())
        .bind(data.email().map(|e| e.as_str()))
        .bind(data.phone().map(|p| p.as_str()))
        .bind(data.hire_date())
        .execute(&self.pool)
        .await
        .map_err(database_error("update employee"))?;

        let version = check_updated(&result, ENTITY, employee.id(), employee.version())?;
        Ok(Entity::new(*employee.id(), version, data.clone()))
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<(), RepositoryError> {
        delete_row(&self.pool, "employees", id.value()).await
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, version, first_name, last_name, email, phone, hire_date
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("fetch employees"))?;

        rows.into_iter().map(Employee::try_from).collect()
    }
}
