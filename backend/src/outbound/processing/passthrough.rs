//! Processor that echoes the user photo back as the try-on result.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::ImageFormat;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{TryOnProcessingError, TryOnProcessor, TryOnStore};
use crate::domain::{StoredSubmission, TraceId};

/// Re-encodes the uploaded user image as PNG and publishes it immediately.
///
/// Decoding failures are recorded as `{"status": "failed", "error": ...}`
/// in `result.json` so pollers stop waiting.
#[derive(Clone)]
pub struct PassthroughProcessor {
    store: Arc<dyn TryOnStore>,
}

impl PassthroughProcessor {
    pub fn new(store: Arc<dyn TryOnStore>) -> Self {
        Self { store }
    }

    async fn render(&self, submission: &StoredSubmission) -> Result<Vec<u8>, TryOnProcessingError> {
        let file_name = submission.user_image.file_name.as_str();
        let bytes = self
            .store
            .load_upload(&submission.request_id, file_name)
            .await
            .map_err(|err| TryOnProcessingError::input(err.to_string()))?
            .ok_or_else(|| TryOnProcessingError::input(format!("{file_name} is missing")))?;

        TraceId::spawn_blocking(move || to_png(&bytes))
            .await
            .map_err(|err| TryOnProcessingError::output(format!("encoder task failed: {err}")))?
    }
}

fn to_png(bytes: &[u8]) -> Result<Vec<u8>, TryOnProcessingError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|err| TryOnProcessingError::input(format!("cannot decode user image: {err}")))?;
    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| TryOnProcessingError::output(format!("cannot encode PNG: {err}")))?;
    Ok(png)
}

#[async_trait]
impl TryOnProcessor for PassthroughProcessor {
    async fn process(&self, submission: &StoredSubmission) -> Result<(), TryOnProcessingError> {
        let id = &submission.request_id;
        match self.render(submission).await {
            Ok(png) => {
                let result = json!({
                    "status": "completed",
                    "mode": submission.mode,
                    "resultImage": crate::outbound::storage::RESULT_IMAGE_FILE,
                });
                self.store
                    .write_result(id, &result, Some(png))
                    .await
                    .map_err(|err| TryOnProcessingError::output(err.to_string()))?;
                info!(request_id = %id, "passthrough result published");
                Ok(())
            }
            Err(err) => {
                let result = json!({ "status": "failed", "error": err.to_string() });
                if let Err(write_err) = self.store.write_result(id, &result, None).await {
                    warn!(request_id = %id, error = %write_err, "failed to record processing failure");
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the passthrough processor.
    use super::*;
    use crate::domain::ports::{MockTryOnStore, TryOnStoreError};
    use crate::domain::{StoredImage, TryOnMode, TryOnRequestId};
    use chrono::{DateTime, Utc};
    use image::{Rgb, RgbImage};
    use rstest::rstest;
    use serde_json::Value;

    fn submission() -> StoredSubmission {
        let image = |name: &str| StoredImage {
            file_name: name.to_owned(),
            content_type: "image/png".to_owned(),
            size_bytes: 0,
            sha256: String::new(),
        };
        StoredSubmission {
            request_id: TryOnRequestId::parse("req-12345").expect("valid id"),
            mode: TryOnMode::TwoD,
            submitted_at: DateTime::<Utc>::UNIX_EPOCH,
            user_image: image("user-image.png"),
            clothing_image: image("clothing-image.png"),
        }
    }

    fn png_fixture() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(2, 2, Rgb([200, 10, 10]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode fixture");
        bytes
    }

    #[rstest]
    #[tokio::test]
    async fn publishes_png_result() {
        let mut store = MockTryOnStore::new();
        store
            .expect_load_upload()
            .withf(|_, name| name == "user-image.png")
            .return_once(|_, _| Ok(Some(png_fixture())));
        store
            .expect_write_result()
            .withf(|_, result: &Value, png: &Option<Vec<u8>>| {
                result["status"] == "completed"
                    && png
                        .as_deref()
                        .is_some_and(|bytes| image::guess_format(bytes).ok() == Some(ImageFormat::Png))
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        PassthroughProcessor::new(Arc::new(store))
            .process(&submission())
            .await
            .expect("process succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn records_failure_for_undecodable_upload() {
        let mut store = MockTryOnStore::new();
        store
            .expect_load_upload()
            .return_once(|_, _| Ok(Some(b"not an image".to_vec())));
        store
            .expect_write_result()
            .withf(|_, result: &Value, png: &Option<Vec<u8>>| {
                result["status"] == "failed" && png.is_none()
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let err = PassthroughProcessor::new(Arc::new(store))
            .process(&submission())
            .await
            .expect_err("decode failure");
        assert!(matches!(err, TryOnProcessingError::Input { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_upload_is_an_input_error() {
        let mut store = MockTryOnStore::new();
        store.expect_load_upload().return_once(|_, _| Ok(None));
        store
            .expect_write_result()
            .return_once(|_, _, _| Err(TryOnStoreError::io("read-only")));

        let err = PassthroughProcessor::new(Arc::new(store))
            .process(&submission())
            .await
            .expect_err("missing upload");
        assert!(matches!(err, TryOnProcessingError::Input { .. }));
    }
}
