//! Processor that defers all work to an external worker.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::StoredSubmission;
use crate::domain::ports::{TryOnProcessingError, TryOnProcessor};

/// No-op processor.
///
/// An external process is expected to write `result.json` and
/// `result-image.png` into the request directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExternalProcessor;

#[async_trait]
impl TryOnProcessor for ExternalProcessor {
    async fn process(&self, submission: &StoredSubmission) -> Result<(), TryOnProcessingError> {
        debug!(
            request_id = %submission.request_id,
            "awaiting external try-on worker"
        );
        Ok(())
    }
}
