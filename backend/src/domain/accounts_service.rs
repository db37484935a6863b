//! Account domain service: signup, login, and profile lookup.
//!
//! Implements the account driving ports on top of a user repository and a
//! password hasher. Email addresses arrive already normalised, so duplicate
//! detection is case-insensitive.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, SignupService, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{Error, LoginCredentials, SignupDetails, User, UserId, UserRecord};

/// Message returned when signup hits an existing email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";
/// Message returned for any failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";

/// Account service implementing [`SignupService`], [`LoginService`], and
/// [`UserProfileQuery`].
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create a new service.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use tryon_backend::domain::AccountService;
    /// # use tryon_backend::outbound::persistence::MemoryUserRepository;
    /// # use tryon_backend::outbound::security::Argon2PasswordHasher;
    /// let service = AccountService::new(
    ///     Arc::new(MemoryUserRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::invalid_request(DUPLICATE_EMAIL_MESSAGE)
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn invalid_credentials() -> Error {
        Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
    }
}

#[async_trait]
impl SignupService for AccountService {
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(Self::map_persistence_error)?;
        if existing.is_some() {
            debug!(email = %details.email(), "signup rejected: email already registered");
            return Err(Error::invalid_request(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(Self::map_hash_error)?;
        let user = User::new(
            UserId::random(),
            details.name().clone(),
            details.email().clone(),
            self.clock.utc(),
        );
        let record = UserRecord {
            user: user.clone(),
            password_hash,
        };
        self.users
            .insert(&record)
            .await
            .map_err(Self::map_persistence_error)?;

        info!(user_id = %user.id(), "user created");
        Ok(user)
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(record) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_persistence_error)?
        else {
            return Err(Self::invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &record.password_hash)
            .await
            .map_err(Self::map_hash_error)?;
        if !matches {
            debug!(user_id = %record.user.id(), "login rejected: password mismatch");
            return Err(Self::invalid_credentials());
        }
        Ok(record.user)
    }
}

#[async_trait]
impl UserProfileQuery for AccountService {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}
