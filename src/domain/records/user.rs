//! Application user aggregate.

use serde::Serialize;

use crate::domain::foundation::{Entity, UserId, ValidationError};
use crate::domain::values::{EmailAddress, IpAddress};

/// Stored user snapshot.
pub type User = Entity<UserId, UserData>;

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    username: String,
    email: EmailAddress,
    last_login_ip: Option<IpAddress>,
}

impl UserData {
    /// Usernames are lower-cased and limited to letters, digits, `.`, `_`
    /// and `-`.
    pub fn new(
        username: &str,
        email: EmailAddress,
        last_login_ip: Option<IpAddress>,
    ) -> Result<Self, ValidationError> {
        let username = username.trim().to_lowercase();
        let length = username.chars().count();
        if length < MIN_USERNAME_LENGTH || length > MAX_USERNAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "username",
                MIN_USERNAME_LENGTH as i64,
                MAX_USERNAME_LENGTH as i64,
                length as i64,
            ));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(ValidationError::invalid_format("Username", username));
        }
        Ok(Self {
            username,
            email,
            last_login_ip,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn last_login_ip(&self) -> Option<&IpAddress> {
        self.last_login_ip.as_ref()
    }

    pub fn with_last_login_ip(mut self, ip: IpAddress) -> Self {
        self.last_login_ip = Some(ip);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> EmailAddress {
        EmailAddress::of("admin@example.com").unwrap()
    }

    #[test]
    fn lowercases_username() {
        assert_eq!(UserData::new("Admin", email(), None).unwrap().username(), "admin");
    }

    #[test]
    fn rejects_short_and_odd_usernames() {
        assert!(matches!(
            UserData::new("ab", email(), None),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            UserData::new("a b c", email(), None),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
