//! In-process `UserRepository` used when no database URL is configured.
//!
//! Accounts live only as long as the process.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId, UserRecord};

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<UserId, UserRecord>,
    ids_by_email: HashMap<EmailAddress, UserId>,
}

/// Volatile account store keyed by id and by normalised email.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<Accounts>,
}

fn poisoned<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        let email = record.user.email();
        if accounts.ids_by_email.contains_key(email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        accounts
            .ids_by_email
            .insert(email.clone(), record.user.id().clone());
        accounts
            .by_id
            .insert(record.user.id().clone(), record.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts
            .ids_by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.by_id.get(id).map(|record| record.user.clone()))
    }
}
