//! Display locale configuration

use serde::Deserialize;

use crate::domain::foundation::ValidationError as DomainValidationError;
use crate::domain::values::{Country, Locale};

/// Locale used when rendering country names
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct LocaleConfig {
    #[serde(default)]
    pub default_locale: Locale,
}

impl LocaleConfig {
    /// Looks up a country with its name in the configured locale.
    pub fn country(&self, iso_code: &str) -> Result<Country, DomainValidationError> {
        Country::of_locale(iso_code, self.default_locale)
    }
}
