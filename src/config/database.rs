//! PostgreSQL settings for the repository adapters.
//!
//! The adapters only issue short statements: single-row inserts, conditional
//! `UPDATE ... WHERE version = $n` writes and the task transaction that
//! replaces assignee rows. A server-side `statement_timeout` bounds how long
//! a write may wait on a row lock held by a concurrent writer.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use super::error::ValidationError;

/// Largest pool the crate will open.
pub const MAX_POOL_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` connection URL.
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a caller waits for a pooled connection.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Server-side statement timeout in milliseconds. Zero leaves the server
    /// default in place.
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,

    /// Reported to the server as `application_name`.
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

impl DatabaseConfig {
    /// Settings for `url` with every other field at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            statement_timeout_ms: default_statement_timeout_ms(),
            application_name: default_application_name(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.connect_options()?;
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    /// Parses the URL and applies the session settings.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("database.url"));
        }
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }

        let options: PgConnectOptions =
            url.parse().map_err(|_| ValidationError::InvalidDatabaseUrl)?;
        let options = options.application_name(&self.application_name);
        if self.statement_timeout_ms == 0 {
            return Ok(options);
        }
        Ok(options.options([("statement_timeout", self.statement_timeout_ms)]))
    }

    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }

    /// Opens a connection pool for the repository adapters.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        let options = self
            .connect_options()
            .map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
        let pool = self.pool_options().connect_with(options).await?;
        info!(
            max_connections = self.max_connections,
            application_name = %self.application_name,
            "Connected to PostgreSQL"
        );
        Ok(pool)
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_statement_timeout_ms() -> u64 {
    5_000
}

fn default_application_name() -> String {
    "business-records".to_string()
}
