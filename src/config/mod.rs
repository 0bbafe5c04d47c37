//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BUSINESS_RECORDS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use business_records::config::AppConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//! config.logging.init_tracing()?;
//!
//! let pool = config.database.connect().await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod locale;
mod logging;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use locale::LocaleConfig;
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection pool)
    pub database: DatabaseConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Locale for country display names
    #[serde(default)]
    pub locale: LocaleConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BUSINESS_RECORDS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BUSINESS_RECORDS__DATABASE__URL=...` -> `database.url = ...`
    /// - `BUSINESS_RECORDS__LOGGING__FORMAT=json` -> `logging.format = json`
    /// - `BUSINESS_RECORDS__LOCALE__DEFAULT_LOCALE=fi` -> `locale.default_locale = fi`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BUSINESS_RECORDS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
