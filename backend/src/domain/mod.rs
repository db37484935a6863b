//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! layers and the use-case services that orchestrate them. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error envelope.
//! - TraceId: per-request correlation identifier.
//! - User, UserRecord, EmailAddress, PersonName: account model.
//! - SignupDetails, LoginCredentials, PasswordHash: authentication inputs.
//! - TryOnRequestId, TryOnMode, ImageUpload, TryOnSubmission, TryOnStatus,
//!   PreviewImage: try-on request lifecycle.
//! - AccountService, TryOnService: driving port implementations.

pub mod accounts_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod tryon;
pub mod tryon_service;
pub mod user;

pub use self::accounts_service::AccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, PasswordHash, SignupDetails};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::tryon::{
    ESTIMATED_TIME_SECONDS, ImageRole, ImageUpload, PreviewImage, PreviewSource,
    REQUEST_ID_MAX_LEN, REQUEST_ID_MIN_LEN, StoredImage, StoredSubmission, TryOnAccepted,
    TryOnMode, TryOnRequestId, TryOnStatus, TryOnSubmission, TryOnValidationError,
};
pub use self::tryon_service::TryOnService;
pub use self::user::{
    EmailAddress, NAME_MAX, PersonName, User, UserId, UserRecord, UserValidationError,
};

