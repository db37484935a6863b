//! Port for the try-on computation collaborator.

use async_trait::async_trait;

use crate::domain::StoredSubmission;

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a try-on result.
    pub enum TryOnProcessingError {
        /// An uploaded image could not be read or decoded.
        Input { message: String } => "try-on input unusable: {message}",
        /// The result could not be encoded or stored.
        Output { message: String } => "try-on output failed: {message}",
    }
}

/// Starts (or performs) processing for a stored submission.
///
/// Implementations may finish synchronously, hand off to another process,
/// or do nothing at all. Callers treat failures as best effort.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryOnProcessor: Send + Sync {
    async fn process(&self, submission: &StoredSubmission) -> Result<(), TryOnProcessingError>;
}
