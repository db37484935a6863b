//! Multipart decoding for the two-image try-on upload.
//!
//! Parts named `userImage` and `clothingImage` are buffered up to one byte
//! past the per-file limit; anything larger is reported as too large without
//! buffering the rest. Unknown parts and repeated fields are drained and
//! ignored.

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::domain::{
    Error, ImageRole, ImageUpload, TryOnMode, TryOnSubmission, TryOnValidationError,
};

/// Default per-file cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const BODY_SLACK_BYTES: usize = 64 * 1024;

/// Size limits applied while reading an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    max_file_bytes: usize,
}

impl UploadLimits {
    pub const fn new(max_file_bytes: usize) -> Self {
        Self { max_file_bytes }
    }

    pub const fn max_file_bytes(self) -> usize {
        self.max_file_bytes
    }

    /// Whole-body cap: both files plus room for headers and stray fields.
    pub const fn max_body_bytes(self) -> usize {
        self.max_file_bytes
            .saturating_mul(2)
            .saturating_add(BODY_SLACK_BYTES)
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

struct RawPart {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

struct BodyBudget {
    remaining: usize,
}

impl BodyBudget {
    fn consume(&mut self, len: usize) -> Result<(), Error> {
        self.remaining = self.remaining.checked_sub(len).ok_or_else(|| {
            Error::invalid_request("Upload is too large")
        })?;
        Ok(())
    }
}

fn malformed(err: impl std::fmt::Display) -> Error {
    Error::invalid_request("Malformed multipart body").with_details(json!({ "reason": err.to_string() }))
}

async fn read_part(
    field: &mut Field,
    keep_up_to: usize,
    budget: &mut BodyBudget,
) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.consume(chunk.len())?;
        let room = keep_up_to.saturating_sub(bytes.len());
        bytes.extend(chunk.iter().take(room));
    }
    Ok(bytes)
}

/// Read both images from a multipart body and validate them.
///
/// Presence is checked before content type and size, so a request missing
/// either part always reports the missing image. A body that fails to parse
/// before either image is read counts as missing both.
pub async fn read_tryon_submission(
    mode: TryOnMode,
    mut payload: Multipart,
    limits: UploadLimits,
) -> Result<TryOnSubmission, Error> {
    let mut budget = BodyBudget {
        remaining: limits.max_body_bytes(),
    };
    let mut user: Option<RawPart> = None;
    let mut clothing: Option<RawPart> = None;

    loop {
        let next = payload.try_next().await;
        // An empty form surfaces as a stream error before any part arrives.
        let mut field = match next {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) if user.is_none() && clothing.is_none() => {
                return Err(TryOnValidationError::MissingImage.into());
            }
            Err(err) => return Err(malformed(err)),
        };
        let role = field.name().and_then(ImageRole::from_form_field);
        let slot = match role {
            Some(ImageRole::User) if user.is_none() => &mut user,
            Some(ImageRole::Clothing) if clothing.is_none() => &mut clothing,
            _ => {
                read_part(&mut field, 0, &mut budget).await?;
                continue;
            }
        };
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or_default()
            .to_owned();
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_owned())
            .unwrap_or_default();
        let bytes = read_part(
            &mut field,
            limits.max_file_bytes().saturating_add(1),
            &mut budget,
        )
        .await?;
        *slot = Some(RawPart {
            file_name,
            content_type,
            bytes,
        });
    }

    let (Some(user), Some(clothing)) = (user, clothing) else {
        return Err(TryOnValidationError::MissingImage.into());
    };
    let validate = |role, part: RawPart| {
        ImageUpload::try_new(
            role,
            part.file_name,
            part.content_type,
            part.bytes,
            limits.max_file_bytes(),
        )
    };
    let user_image = validate(ImageRole::User, user)?;
    let clothing_image = validate(ImageRole::Clothing, clothing)?;
    Ok(TryOnSubmission::try_new(
        mode,
        Some(user_image),
        Some(clothing_image),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_limit_is_five_mebibytes() {
        assert_eq!(UploadLimits::default().max_file_bytes(), 5_242_880);
    }

    #[rstest]
    #[case(10, 20 + 64 * 1024)]
    #[case(usize::MAX, usize::MAX)]
    fn body_limit_covers_both_files(#[case] per_file: usize, #[case] expected: usize) {
        assert_eq!(UploadLimits::new(per_file).max_body_bytes(), expected);
    }

    #[rstest]
    fn body_budget_rejects_overflow() {
        let mut budget = BodyBudget { remaining: 4 };
        budget.consume(3).expect("within budget");
        let err = budget.consume(2).expect_err("over budget");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
