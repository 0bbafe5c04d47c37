//! Employee aggregate.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{
    required_text, Entity, EmployeeId, ValidationError, MAX_TEXT_LENGTH,
};
use crate::domain::values::{EmailAddress, PhoneNumber};

/// Stored employee snapshot.
pub type Employee = Entity<EmployeeId, EmployeeData>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeData {
    first_name: String,
    last_name: String,
    email: Option<EmailAddress>,
    phone: Option<PhoneNumber>,
    hire_date: Option<NaiveDate>,
}

impl EmployeeData {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<EmailAddress>,
        phone: Option<PhoneNumber>,
        hire_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: required_text("firstName", first_name, MAX_TEXT_LENGTH)?,
            last_name: required_text("lastName", last_name, MAX_TEXT_LENGTH)?,
            email,
            phone,
            hire_date,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn hire_date(&self) -> Option<NaiveDate> {
        self.hire_date
    }

    pub fn with_email(mut self, email: Option<EmailAddress>) -> Self {
        self.email = email;
        self
    }

    pub fn with_phone(mut self, phone: Option<PhoneNumber>) -> Self {
        self.phone = phone;
        self
    }
}
