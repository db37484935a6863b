//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Domain use-case port for signing up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account and return the public user projection.
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error>;
}
