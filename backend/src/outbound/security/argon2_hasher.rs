//! Argon2id implementation of the `PasswordHasher` port.

use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Argon2, password_hash};
use async_trait::async_trait;
use rand_core::OsRng;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TraceId};

/// Argon2id with the crate's default (OWASP-recommended) parameters.
///
/// Hashing and verification run on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

async fn run_blocking<T, F>(op: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    T: Send + 'static,
{
    TraceId::spawn_blocking(op)
        .await
        .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        run_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| PasswordHash::new(hash.to_string()))
                .map_err(|err| PasswordHashError::hash(err.to_string()))
        })
        .await
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        run_blocking(move || {
            let parsed = PhcHash::new(&encoded)
                .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHashError::hash(err.to_string())),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the argon2 adapter.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn hashes_are_phc_argon2id_and_verify() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("correct horse").await.expect("hash");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("correct horse"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("battery staple", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("pw").await.expect("hash");
        let second = hasher.hash("pw").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_reported() {
        let err = Argon2PasswordHasher
            .verify("pw", &PasswordHash::new("not-a-phc-string"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
