//! Port for persisting try-on uploads and reading result artifacts.
//!
//! Layout per request: `{id}/user-image.*`, `{id}/clothing-image.*`,
//! `{id}/request.json`, and, once processed, `{id}/result.json` plus
//! `{id}/result-image.png`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{StoredSubmission, TryOnRequestId, TryOnSubmission};

use super::define_port_error;

define_port_error! {
    /// Errors raised by try-on store adapters.
    pub enum TryOnStoreError {
        /// Reading or writing an artifact failed.
        Io { message: String } => "try-on store I/O failed: {message}",
        /// `result.json` exists but is not valid JSON.
        MalformedResult { message: String } => "try-on result is malformed: {message}",
    }
}

/// Storage for try-on requests and their results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TryOnStore: Send + Sync {
    /// Write both uploads and the request manifest under `id`.
    async fn save_submission(
        &self,
        id: &TryOnRequestId,
        submission: &TryOnSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<StoredSubmission, TryOnStoreError>;

    /// Parsed `result.json`, or `None` when it does not exist yet.
    async fn load_result(&self, id: &TryOnRequestId) -> Result<Option<Value>, TryOnStoreError>;

    /// Bytes of `result-image.png`, or `None` when absent.
    async fn load_result_image(
        &self,
        id: &TryOnRequestId,
    ) -> Result<Option<Vec<u8>>, TryOnStoreError>;

    /// Bytes of the configured placeholder image, or `None` when absent.
    async fn load_placeholder(&self) -> Result<Option<Vec<u8>>, TryOnStoreError>;

    /// Read back a stored upload by its file name inside the request directory.
    async fn load_upload(
        &self,
        id: &TryOnRequestId,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>, TryOnStoreError>;

    /// Publish a result document, writing the preview image first when given.
    async fn write_result(
        &self,
        id: &TryOnRequestId,
        result: &Value,
        preview_png: Option<Vec<u8>>,
    ) -> Result<(), TryOnStoreError>;
}
