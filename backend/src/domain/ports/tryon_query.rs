//! Driving port for reading try-on status and previews.

use async_trait::async_trait;

use crate::domain::{Error, PreviewImage, TryOnMode, TryOnRequestId, TryOnStatus};

/// Domain use-case port for polling a try-on request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryOnQuery: Send + Sync {
    /// Report whether a result document exists for `id`.
    ///
    /// Identifiers that were never issued report
    /// [`TryOnStatus::Processing`].
    async fn status(&self, mode: TryOnMode, id: &TryOnRequestId) -> Result<TryOnStatus, Error>;

    /// Result image, falling back to the placeholder.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when neither exists.
    async fn preview(&self, mode: TryOnMode, id: &TryOnRequestId) -> Result<PreviewImage, Error>;
}
