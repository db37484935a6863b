//! Try-on request lifecycle types.
//!
//! A try-on request pairs a user photo with a garment photo under a
//! generated identifier. Result artifacts are produced elsewhere and read
//! back on demand, so nothing here models progress beyond "result file
//! present or not".

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Minimum accepted length for a request identifier on read paths.
pub const REQUEST_ID_MIN_LEN: usize = 5;
/// Upper bound keeping identifiers usable as a single directory name.
pub const REQUEST_ID_MAX_LEN: usize = 64;
/// Advisory processing estimate returned to clients.
pub const ESTIMATED_TIME_SECONDS: u32 = 5;

/// Validation failures for try-on inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TryOnValidationError {
    #[error("Invalid request ID")]
    InvalidRequestId,
    #[error("unknown try-on mode: {0}")]
    UnknownMode(String),
    #[error("Both user image and clothing image are required")]
    MissingImage,
    #[error("Invalid file type. Please upload image files only.")]
    NotAnImage { role: ImageRole },
    #[error("Uploaded {role} is empty")]
    EmptyImage { role: ImageRole },
    #[error("Uploaded {role} exceeds the {max_bytes} byte limit")]
    ImageTooLarge { role: ImageRole, max_bytes: usize },
}

/// Identifier naming a try-on request and its upload directory.
///
/// ## Invariants
/// - between [`REQUEST_ID_MIN_LEN`] and [`REQUEST_ID_MAX_LEN`] characters;
/// - only ASCII letters, digits, `-`, and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TryOnRequestId(String);

impl TryOnRequestId {
    /// Issue a fresh identifier for a new upload.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Validate an identifier received from a client.
    ///
    /// # Examples
    /// ```
    /// use tryon_backend::domain::TryOnRequestId;
    ///
    /// assert!(TryOnRequestId::parse("abcd").is_err());
    /// assert!(TryOnRequestId::parse("../etc").is_err());
    /// assert!(TryOnRequestId::parse("req-12345").is_ok());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, TryOnValidationError> {
        let length = raw.len();
        let allowed = raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !(REQUEST_ID_MIN_LEN..=REQUEST_ID_MAX_LEN).contains(&length) || !allowed {
            return Err(TryOnValidationError::InvalidRequestId);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TryOnRequestId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TryOnRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TryOnRequestId> for String {
    fn from(value: TryOnRequestId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TryOnRequestId {
    type Error = TryOnValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Try-on flavour selected by the upload route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TryOnMode {
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

impl TryOnMode {
    /// Path segment used in URLs and manifests.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
        }
    }
}

impl fmt::Display for TryOnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TryOnMode {
    type Err = TryOnValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "2d" => Ok(Self::TwoD),
            "3d" => Ok(Self::ThreeD),
            _ => Err(TryOnValidationError::UnknownMode(s.to_owned())),
        }
    }
}

/// Which of the two uploaded photos an image is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageRole {
    User,
    Clothing,
}

impl ImageRole {
    /// Multipart form field carrying this image.
    pub const fn form_field(self) -> &'static str {
        match self {
            Self::User => "userImage",
            Self::Clothing => "clothingImage",
        }
    }

    /// Stored file name without extension.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::User => "user-image",
            Self::Clothing => "clothing-image",
        }
    }

    /// Resolve a multipart field name.
    pub fn from_form_field(field: &str) -> Option<Self> {
        match field {
            "userImage" => Some(Self::User),
            "clothingImage" => Some(Self::Clothing),
            _ => None,
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user image"),
            Self::Clothing => f.write_str("clothing image"),
        }
    }
}

/// A validated uploaded photo held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    role: ImageRole,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate an uploaded part.
    ///
    /// The content type must start with `image/`, the payload must be
    /// non-empty and no larger than `max_bytes`.
    pub fn try_new(
        role: ImageRole,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, TryOnValidationError> {
        let content_type = content_type.into();
        if !content_type.to_ascii_lowercase().starts_with("image/") {
            return Err(TryOnValidationError::NotAnImage { role });
        }
        if bytes.is_empty() {
            return Err(TryOnValidationError::EmptyImage { role });
        }
        if bytes.len() > max_bytes {
            return Err(TryOnValidationError::ImageTooLarge { role, max_bytes });
        }
        Ok(Self {
            role,
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    pub fn role(&self) -> ImageRole {
        self.role
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    pub fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Lower-cased extension of the client file name, dot included.
    ///
    /// Returns an empty string when the name has no dot or ends in one.
    ///
    /// # Examples
    /// ```
    /// use tryon_backend::domain::{ImageRole, ImageUpload};
    ///
    /// let upload = ImageUpload::try_new(ImageRole::User, "Me.JPG", "image/jpeg", vec![1], 10).unwrap();
    /// assert_eq!(upload.extension(), ".jpg");
    /// ```
    pub fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if is_safe_extension(ext) => format!(".{}", ext.to_ascii_lowercase()),
            _ => String::new(),
        }
    }

    /// File name the upload is stored under inside its request directory.
    pub fn stored_file_name(&self) -> String {
        format!("{}{}", self.role.file_stem(), self.extension())
    }
}

// Client file names are untrusted; anything that could alter the stored path
// is dropped rather than persisted.
fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphanumeric())
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("role", &self.role)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Both photos for a new try-on request.
#[derive(Debug, Clone)]
pub struct TryOnSubmission {
    pub mode: TryOnMode,
    pub user_image: ImageUpload,
    pub clothing_image: ImageUpload,
}

impl TryOnSubmission {
    /// Pair the two uploads, failing if either is absent.
    pub fn try_new(
        mode: TryOnMode,
        user_image: Option<ImageUpload>,
        clothing_image: Option<ImageUpload>,
    ) -> Result<Self, TryOnValidationError> {
        match (user_image, clothing_image) {
            (Some(user_image), Some(clothing_image)) => Ok(Self {
                mode,
                user_image,
                clothing_image,
            }),
            _ => Err(TryOnValidationError::MissingImage),
        }
    }
}

/// Per-image entry recorded in the request manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub sha256: String,
}

/// Stored request, written next to the uploads as `request.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    pub request_id: TryOnRequestId,
    pub mode: TryOnMode,
    pub submitted_at: DateTime<Utc>,
    pub user_image: StoredImage,
    pub clothing_image: StoredImage,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnAccepted {
    pub request_id: TryOnRequestId,
    pub mode: TryOnMode,
    pub estimated_time_seconds: u32,
}

impl TryOnAccepted {
    pub fn new(request_id: TryOnRequestId, mode: TryOnMode) -> Self {
        Self {
            request_id,
            mode,
            estimated_time_seconds: ESTIMATED_TIME_SECONDS,
        }
    }

    /// URL at which the result preview can be fetched.
    pub fn result_preview_url(&self) -> String {
        format!(
            "/api/tryon/{}/result/{}/preview",
            self.mode, self.request_id
        )
    }
}

/// Observable state of a try-on request.
#[derive(Debug, Clone, PartialEq)]
pub enum TryOnStatus {
    /// No result document exists yet.
    Processing,
    /// A result document exists; its contents are echoed unvalidated.
    Completed(Value),
}

/// Where a preview image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSource {
    Result,
    Placeholder,
}

/// PNG bytes served by the preview endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub source: PreviewSource,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewImage")
            .field("source", &self.source)
            .field("len", &self.bytes.len())
            .finish()
    }
}
