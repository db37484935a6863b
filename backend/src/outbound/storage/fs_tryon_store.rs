//! `TryOnStore` backed by a directory tree under the uploads root.
//!
//! All access goes through a `cap_std::fs::Dir` handle opened on the uploads
//! root, so request paths cannot escape it even if an identifier slipped past
//! validation. Blocking file I/O runs on the blocking pool with the caller's
//! trace id re-scoped.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::{TryOnStore, TryOnStoreError};
use crate::domain::{
    ImageUpload, StoredImage, StoredSubmission, TraceId, TryOnRequestId, TryOnSubmission,
};

/// Request manifest file name.
pub const MANIFEST_FILE: &str = "request.json";
/// Result document file name.
pub const RESULT_FILE: &str = "result.json";
/// Result preview file name.
pub const RESULT_IMAGE_FILE: &str = "result-image.png";

/// Raised when the uploads root cannot be created or opened.
#[derive(Debug, thiserror::Error)]
#[error("failed to open uploads directory {path}: {source}")]
pub struct StorageInitError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Filesystem implementation of [`TryOnStore`].
#[derive(Clone)]
pub struct FsTryOnStore {
    root: Arc<Dir>,
    placeholder_path: Option<PathBuf>,
}

impl FsTryOnStore {
    /// Create (if needed) and open `uploads_dir`.
    ///
    /// `placeholder_path` names the image served while no result exists;
    /// `None` disables the fallback.
    pub fn open(
        uploads_dir: impl AsRef<Path>,
        placeholder_path: Option<PathBuf>,
    ) -> Result<Self, StorageInitError> {
        let path = uploads_dir.as_ref();
        let to_error = |source| StorageInitError {
            path: path.to_path_buf(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(to_error)?;
        let root = Dir::open_ambient_dir(path, ambient_authority()).map_err(to_error)?;
        Ok(Self {
            root: Arc::new(root),
            placeholder_path,
        })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, TryOnStoreError>
    where
        F: FnOnce(&Dir) -> Result<T, TryOnStoreError> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        TraceId::spawn_blocking(move || op(&root))
            .await
            .map_err(|err| TryOnStoreError::io(format!("storage task failed: {err}")))?
    }
}

fn io_error(path: impl AsRef<Path>, err: io::Error) -> TryOnStoreError {
    TryOnStoreError::io(format!("{}: {err}", path.as_ref().display()))
}

fn read_optional(dir: &Dir, path: &Path) -> Result<Option<Vec<u8>>, TryOnStoreError> {
    match dir.read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(path, err)),
    }
}

fn request_path(id: &TryOnRequestId, file_name: &str) -> PathBuf {
    Path::new(id.as_str()).join(file_name)
}

fn write_upload(
    dir: &Dir,
    id: &TryOnRequestId,
    upload: &ImageUpload,
) -> Result<StoredImage, TryOnStoreError> {
    let file_name = upload.stored_file_name();
    let path = request_path(id, &file_name);
    dir.write(&path, upload.bytes())
        .map_err(|err| io_error(&path, err))?;
    Ok(StoredImage {
        file_name,
        content_type: upload.content_type().to_owned(),
        size_bytes: upload.bytes().len() as u64,
        sha256: hex::encode(Sha256::digest(upload.bytes())),
    })
}

fn to_json(value: &impl serde::Serialize) -> Result<Vec<u8>, TryOnStoreError> {
    serde_json::to_vec_pretty(value)
        .map_err(|err| TryOnStoreError::io(format!("failed to encode JSON: {err}")))
}

#[async_trait]
impl TryOnStore for FsTryOnStore {
    async fn save_submission(
        &self,
        id: &TryOnRequestId,
        submission: &TryOnSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<StoredSubmission, TryOnStoreError> {
        let id = id.clone();
        let submission = submission.clone();
        self.blocking(move |root| {
            root.create_dir_all(id.as_str())
                .map_err(|err| io_error(id.as_str(), err))?;
            let stored = StoredSubmission {
                user_image: write_upload(root, &id, &submission.user_image)?,
                clothing_image: write_upload(root, &id, &submission.clothing_image)?,
                request_id: id.clone(),
                mode: submission.mode,
                submitted_at,
            };
            let manifest_path = request_path(&id, MANIFEST_FILE);
            root.write(&manifest_path, to_json(&stored)?)
                .map_err(|err| io_error(&manifest_path, err))?;
            debug!(request_id = %id, "uploads written");
            Ok(stored)
        })
        .await
    }

    async fn load_result(&self, id: &TryOnRequestId) -> Result<Option<Value>, TryOnStoreError> {
        let path = request_path(id, RESULT_FILE);
        let Some(bytes) = self.blocking(move |root| read_optional(root, &path)).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| TryOnStoreError::malformed_result(err.to_string()))
    }

    async fn load_result_image(
        &self,
        id: &TryOnRequestId,
    ) -> Result<Option<Vec<u8>>, TryOnStoreError> {
        let path = request_path(id, RESULT_IMAGE_FILE);
        self.blocking(move |root| read_optional(root, &path)).await
    }

    async fn load_placeholder(&self) -> Result<Option<Vec<u8>>, TryOnStoreError> {
        let Some(path) = self.placeholder_path.clone() else {
            return Ok(None);
        };
        TraceId::spawn_blocking(move || {
            let Some(file_name) = path.file_name() else {
                return Ok(None);
            };
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            match Dir::open_ambient_dir(parent, ambient_authority()) {
                Ok(dir) => read_optional(&dir, Path::new(file_name)),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(io_error(parent, err)),
            }
        })
        .await
        .map_err(|err| TryOnStoreError::io(format!("storage task failed: {err}")))?
    }

    async fn load_upload(
        &self,
        id: &TryOnRequestId,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>, TryOnStoreError> {
        if Path::new(file_name).components().count() != 1 {
            return Err(TryOnStoreError::io(format!(
                "upload name {file_name} is not a plain file name"
            )));
        }
        let path = request_path(id, file_name);
        self.blocking(move |root| read_optional(root, &path)).await
    }

    async fn write_result(
        &self,
        id: &TryOnRequestId,
        result: &Value,
        preview_png: Option<Vec<u8>>,
    ) -> Result<(), TryOnStoreError> {
        let id = id.clone();
        let document = to_json(result)?;
        self.blocking(move |root| {
            root.create_dir_all(id.as_str())
                .map_err(|err| io_error(id.as_str(), err))?;
            if let Some(png) = preview_png {
                let image_path = request_path(&id, RESULT_IMAGE_FILE);
                root.write(&image_path, png)
                    .map_err(|err| io_error(&image_path, err))?;
            }
            let result_path = request_path(&id, RESULT_FILE);
            root.write(&result_path, document)
                .map_err(|err| io_error(&result_path, err))
        })
        .await
    }
}
