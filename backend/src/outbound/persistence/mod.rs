//! User persistence adapters.
//!
//! - [`DieselUserRepository`]: PostgreSQL through Diesel, `diesel-async`,
//!   and a `bb8` pool. Row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay private to this module.
//! - [`MemoryUserRepository`]: process-local fallback for database-less
//!   runs and tests.
//!
//! # Example
//!
//! ```ignore
//! use tryon_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tryon")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use memory_user_repository::MemoryUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
