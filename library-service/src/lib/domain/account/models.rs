use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::DisplayNameError;
use crate::domain::account::errors::HandleError;
use crate::domain::account::errors::SecretError;
use crate::domain::account::errors::SubscriberIdError;

/// Account aggregate entity.
///
/// Created on registration and never mutated afterwards. Holds the password
/// digest only; the raw secret never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub subscriber_id: SubscriberId,
    pub name: DisplayName,
    pub handle: Handle,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Opaque account identity (lowercase hex, generated once).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subscriber identifier (MSISDN) value type
///
/// Exactly 12 ASCII digits starting with the `62` country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(String);

impl SubscriberId {
    pub const LENGTH: usize = 12;
    pub const COUNTRY_CODE: &'static str = "62";

    /// Create a validated subscriber identifier.
    ///
    /// # Errors
    /// * `InvalidLength` - Not exactly 12 characters
    /// * `NonNumeric` - Contains anything but ASCII digits
    /// * `MissingCountryCode` - Does not start with `62`
    pub fn new(subscriber_id: String) -> Result<Self, SubscriberIdError> {
        let length = subscriber_id.chars().count();
        if length != Self::LENGTH {
            return Err(SubscriberIdError::InvalidLength {
                expected: Self::LENGTH,
                actual: length,
            });
        }

        if !subscriber_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(SubscriberIdError::NonNumeric);
        }

        if !subscriber_id.starts_with(Self::COUNTRY_CODE) {
            return Err(SubscriberIdError::MissingCountryCode {
                prefix: Self::COUNTRY_CODE,
            });
        }

        Ok(Self(subscriber_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique handle (username) value type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    pub fn new(handle: String) -> Result<Self, HandleError> {
        if handle.trim().is_empty() {
            return Err(HandleError::Empty);
        }
        Ok(Self(handle))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw secret, alive only for the duration of a single request.
///
/// `Debug` is redacted so the secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: String) -> Result<Self, SecretError> {
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub subscriber_id: SubscriberId,
    pub name: DisplayName,
    pub handle: Handle,
    pub secret: Secret,
}

impl RegisterCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// Any value-type validation failure, converted into `AccountError`
    pub fn new(
        subscriber_id: String,
        name: String,
        handle: String,
        secret: String,
    ) -> Result<Self, AccountError> {
        Ok(Self {
            subscriber_id: SubscriberId::new(subscriber_id)?,
            name: DisplayName::new(name)?,
            handle: Handle::new(handle)?,
            secret: Secret::new(secret)?,
        })
    }
}

/// Command to log in with a subscriber identifier and secret
#[derive(Debug)]
pub struct LoginCommand {
    pub subscriber_id: SubscriberId,
    pub secret: Secret,
}

impl LoginCommand {
    pub fn new(subscriber_id: String, secret: String) -> Result<Self, AccountError> {
        Ok(Self {
            subscriber_id: SubscriberId::new(subscriber_id)?,
            secret: Secret::new(secret)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_id_valid() {
        let subscriber_id = SubscriberId::new("628123456789".to_string()).unwrap();
        assert_eq!(subscriber_id.as_str(), "628123456789");
    }

    #[test]
    fn test_subscriber_id_wrong_length() {
        assert_eq!(
            SubscriberId::new("62812345678".to_string()),
            Err(SubscriberIdError::InvalidLength {
                expected: 12,
                actual: 11
            })
        );
        assert_eq!(
            SubscriberId::new("6281234567890".to_string()),
            Err(SubscriberIdError::InvalidLength {
                expected: 12,
                actual: 13
            })
        );
    }

    #[test]
    fn test_subscriber_id_non_numeric() {
        assert_eq!(
            SubscriberId::new("62812345678a".to_string()),
            Err(SubscriberIdError::NonNumeric)
        );
    }

    #[test]
    fn test_subscriber_id_missing_country_code() {
        assert_eq!(
            SubscriberId::new("081234567890".to_string()),
            Err(SubscriberIdError::MissingCountryCode { prefix: "62" })
        );
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert_eq!(Handle::new("   ".to_string()), Err(HandleError::Empty));
        assert_eq!(DisplayName::new(String::new()), Err(DisplayNameError::Empty));
        assert_eq!(Secret::new(String::new()), Err(SecretError::Empty));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new("hunter2".to_string()).unwrap();
        assert_eq!(format!("{:?}", secret), "Secret(***)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_register_command_validation() {
        let command = RegisterCommand::new(
            "628123456789".to_string(),
            "Alice".to_string(),
            "alice".to_string(),
            "s3cret".to_string(),
        );
        assert!(command.is_ok());

        let error = RegisterCommand::new(
            "628123".to_string(),
            "Alice".to_string(),
            "alice".to_string(),
            "s3cret".to_string(),
        )
        .unwrap_err();
        assert!(error.is_validation());
        assert!(matches!(error, AccountError::InvalidSubscriberId(_)));

        let error = RegisterCommand::new(
            "628123456789".to_string(),
            "Alice".to_string(),
            "".to_string(),
            "s3cret".to_string(),
        )
        .unwrap_err();
        assert_eq!(error, AccountError::InvalidHandle(HandleError::Empty));
    }
}
