//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` is stored lower-cased and carries a unique constraint
    /// (`users_email_key`).
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// PHC-formatted argon2id hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}
