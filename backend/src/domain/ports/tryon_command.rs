//! Driving port for submitting try-on requests.

use async_trait::async_trait;

use crate::domain::{Error, TryOnAccepted, TryOnSubmission};

/// Domain use-case port for accepting uploads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryOnCommand: Send + Sync {
    /// Persist the submission under a fresh identifier and start processing.
    async fn submit(&self, submission: TryOnSubmission) -> Result<TryOnAccepted, Error>;
}
