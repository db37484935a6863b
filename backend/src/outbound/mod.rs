//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: user accounts in PostgreSQL (Diesel) or in memory
//! - **storage**: try-on uploads and results on the local filesystem
//! - **processing**: try-on processors (external hand-off, passthrough)
//! - **security**: argon2id password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod processing;
pub mod security;
pub mod storage;
