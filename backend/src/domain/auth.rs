//! Authentication primitives: signup details, login credentials, and
//! password hashes.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, PersonName, UserValidationError};

/// Domain error returned when signup or login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Name, email, or password was absent.
    MissingFields,
    /// A present field failed validation.
    InvalidField {
        field: &'static str,
        reason: UserValidationError,
    },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Missing name, email, or password"),
            Self::InvalidField { reason, .. } => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn missing(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validated signup payload.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty; `email` is lower-cased.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: PersonName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignupDetails {
    /// Construct signup details from raw inputs.
    ///
    /// # Examples
    /// ```
    /// use tryon_backend::domain::SignupDetails;
    ///
    /// let details = SignupDetails::try_from_parts("Ada", "ADA@example.com", "pw").unwrap();
    /// assert_eq!(details.email().as_ref(), "ada@example.com");
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if missing(name) || missing(email) || password.is_empty() {
            return Err(CredentialsValidationError::MissingFields);
        }
        let name = PersonName::new(name).map_err(|reason| {
            CredentialsValidationError::InvalidField {
                field: "name",
                reason,
            }
        })?;
        let email = EmailAddress::new(email).map_err(|reason| {
            CredentialsValidationError::InvalidField {
                field: "email",
                reason,
            }
        })?;
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login credentials used by authentication services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        if missing(email) || password.is_empty() {
            return Err(CredentialsValidationError::MissingFields);
        }
        let email = EmailAddress::new(email).map_err(|reason| {
            CredentialsValidationError::InvalidField {
                field: "email",
                reason,
            }
        })?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Password hash in PHC string format (for example `$argon2id$v=19$...`).
///
/// `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "ada@example.com", "pw")]
    #[case("Ada", "  ", "pw")]
    #[case("Ada", "ada@example.com", "")]
    #[case(" ", "", "")]
    fn signup_requires_all_fields(#[case] name: &str, #[case] email: &str, #[case] password: &str) {
        let err = SignupDetails::try_from_parts(name, email, password)
            .expect_err("missing fields must fail");
        assert_eq!(err, CredentialsValidationError::MissingFields);
        assert_eq!(err.to_string(), "Missing name, email, or password");
    }

    #[rstest]
    fn signup_reports_invalid_email_field() {
        let err = SignupDetails::try_from_parts("Ada", "not-an-email", "pw")
            .expect_err("invalid email must fail");
        assert!(matches!(
            err,
            CredentialsValidationError::InvalidField { field: "email", .. }
        ));
    }

    #[rstest]
    fn signup_keeps_password_whitespace() {
        let details = SignupDetails::try_from_parts("Ada", "ada@example.com", " secret ")
            .expect("valid details");
        assert_eq!(details.password(), " secret ");
        assert_eq!(details.name().as_ref(), "Ada");
    }

    #[rstest]
    #[case("", "pw")]
    #[case("ada@example.com", "")]
    fn login_requires_email_and_password(#[case] email: &str, #[case] password: &str) {
        assert_eq!(
            LoginCredentials::try_from_parts(email, password),
            Err(CredentialsValidationError::MissingFields)
        );
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}
