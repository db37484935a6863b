//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`UserRepository`, `PasswordHasher`, `TryOnStore`,
//! `TryOnProcessor`) are implemented in `crate::outbound`. Driving ports
//! (`SignupService`, `LoginService`, `UserProfileQuery`, `TryOnCommand`,
//! `TryOnQuery`) are implemented by domain services and called from
//! `crate::inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod signup_service;
mod tryon_command;
mod tryon_processor;
mod tryon_query;
mod tryon_store;
mod user_profile_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use tryon_command::MockTryOnCommand;
pub use tryon_command::TryOnCommand;
#[cfg(test)]
pub use tryon_processor::MockTryOnProcessor;
pub use tryon_processor::{TryOnProcessingError, TryOnProcessor};
#[cfg(test)]
pub use tryon_query::MockTryOnQuery;
pub use tryon_query::TryOnQuery;
#[cfg(test)]
pub use tryon_store::MockTryOnStore;
pub use tryon_store::{TryOnStore, TryOnStoreError};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
