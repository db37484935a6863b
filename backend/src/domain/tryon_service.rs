//! Try-on domain service implementing the submit, status, and preview ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{TryOnCommand, TryOnProcessor, TryOnQuery, TryOnStore, TryOnStoreError};
use crate::domain::{
    Error, PreviewImage, PreviewSource, TryOnAccepted, TryOnMode, TryOnRequestId, TryOnStatus,
    TryOnSubmission,
};

/// Message returned when neither a result image nor a placeholder exists.
pub const PREVIEW_NOT_FOUND_MESSAGE: &str = "Result image not found";

/// Try-on service backed by a [`TryOnStore`] and a [`TryOnProcessor`].
#[derive(Clone)]
pub struct TryOnService {
    store: Arc<dyn TryOnStore>,
    processor: Arc<dyn TryOnProcessor>,
    clock: Arc<dyn Clock>,
}

impl TryOnService {
    pub fn new(
        store: Arc<dyn TryOnStore>,
        processor: Arc<dyn TryOnProcessor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            processor,
            clock,
        }
    }

    fn map_store_error(error: TryOnStoreError) -> Error {
        Error::internal(error.to_string())
    }
}

#[async_trait]
impl TryOnCommand for TryOnService {
    async fn submit(&self, submission: TryOnSubmission) -> Result<TryOnAccepted, Error> {
        let id = TryOnRequestId::generate();
        let stored = self
            .store
            .save_submission(&id, &submission, self.clock.utc())
            .await
            .map_err(Self::map_store_error)?;
        info!(request_id = %id, mode = %submission.mode, "try-on request stored");

        // Processing is best effort; the upload already succeeded.
        if let Err(err) = self.processor.process(&stored).await {
            warn!(request_id = %id, error = %err, "try-on processing failed");
        }

        Ok(TryOnAccepted::new(id, submission.mode))
    }
}

#[async_trait]
impl TryOnQuery for TryOnService {
    async fn status(&self, mode: TryOnMode, id: &TryOnRequestId) -> Result<TryOnStatus, Error> {
        let result = self
            .store
            .load_result(id)
            .await
            .map_err(Self::map_store_error)?;
        debug!(request_id = %id, %mode, completed = result.is_some(), "try-on status read");
        Ok(result.map_or(TryOnStatus::Processing, TryOnStatus::Completed))
    }

    async fn preview(&self, mode: TryOnMode, id: &TryOnRequestId) -> Result<PreviewImage, Error> {
        if let Some(bytes) = self
            .store
            .load_result_image(id)
            .await
            .map_err(Self::map_store_error)?
        {
            return Ok(PreviewImage {
                source: PreviewSource::Result,
                bytes,
            });
        }

        match self
            .store
            .load_placeholder()
            .await
            .map_err(Self::map_store_error)?
        {
            Some(bytes) => {
                debug!(request_id = %id, %mode, "serving placeholder preview");
                Ok(PreviewImage {
                    source: PreviewSource::Placeholder,
                    bytes,
                })
            }
            None => Err(Error::not_found(PREVIEW_NOT_FOUND_MESSAGE)),
        }
    }
}
