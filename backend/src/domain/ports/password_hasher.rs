//! Port for one-way password hashing.

use async_trait::async_trait;

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hash computation failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and checks candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Derive a salted hash for a new password.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Return `true` when `password` matches `hash`.
    async fn verify(&self, password: &str, hash: &PasswordHash)
    -> Result<bool, PasswordHashError>;
}

/// Reversible "hasher" for tests that do not exercise real cryptography.
///
/// Never wire this into a running server.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl FixturePasswordHasher {
    const PREFIX: &'static str = "$fixture$";
}

#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{}{password}", Self::PREFIX)))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let stored = hash
            .as_str()
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))?;
        Ok(stored == password)
    }
}
