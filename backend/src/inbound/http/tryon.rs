//! Try-on API handlers.
//!
//! ```text
//! POST /api/tryon/{mode}                          multipart: userImage, clothingImage
//! GET  /api/tryon/{mode}/result/{requestId}
//! GET  /api/tryon/{mode}/result/{requestId}/preview
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, get, http::header::ContentType, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    Error, PreviewSource, TryOnAccepted, TryOnMode, TryOnRequestId, TryOnStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::{no_store_header, result_image_header};
use crate::inbound::http::multipart::read_tryon_submission;
use crate::inbound::http::state::HttpState;

/// Message returned once an upload has been stored.
pub const PROCESSING_STARTED_MESSAGE: &str = "Processing started";
/// Message returned while no result document exists.
pub const STILL_PROCESSING_MESSAGE: &str = "Your virtual try-on is still processing";

/// Multipart body accepted by the upload endpoint.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TryOnUploadForm {
    /// Photo of the person.
    #[schema(value_type = String, format = Binary)]
    pub user_image: Vec<u8>,
    /// Photo of the garment.
    #[schema(value_type = String, format = Binary)]
    pub clothing_image: Vec<u8>,
}

/// Body returned by a successful upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TryOnAcceptedResponse {
    pub success: bool,
    pub message: String,
    pub request_id: String,
    pub estimated_time_seconds: u32,
    pub result_preview_url: String,
}

impl From<TryOnAccepted> for TryOnAcceptedResponse {
    fn from(accepted: TryOnAccepted) -> Self {
        Self {
            success: true,
            message: PROCESSING_STARTED_MESSAGE.to_owned(),
            result_preview_url: accepted.result_preview_url(),
            request_id: accepted.request_id.into(),
            estimated_time_seconds: accepted.estimated_time_seconds,
        }
    }
}

/// Body returned by the status endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum TryOnStatusResponse {
    Processing {
        message: String,
        request_id: String,
    },
    Completed {
        #[schema(value_type = Object)]
        result: Value,
        request_id: String,
    },
}

impl TryOnStatusResponse {
    fn new(outcome: TryOnStatus, id: &TryOnRequestId) -> Self {
        let request_id = id.as_str().to_owned();
        match outcome {
            TryOnStatus::Processing => Self::Processing {
                message: STILL_PROCESSING_MESSAGE.to_owned(),
                request_id,
            },
            TryOnStatus::Completed(result) => Self::Completed { result, request_id },
        }
    }
}

fn parse_mode(raw: &str) -> Result<TryOnMode, Error> {
    Ok(raw.parse::<TryOnMode>()?)
}

fn parse_target(path: web::Path<(String, String)>) -> Result<(TryOnMode, TryOnRequestId), Error> {
    let (mode, id) = path.into_inner();
    Ok((parse_mode(&mode)?, TryOnRequestId::parse(&id)?))
}

/// Upload a person photo and a garment photo.
#[utoipa::path(
    post,
    path = "/api/tryon/{mode}",
    params(("mode" = String, Path, description = "Try-on flavour: `2d` or `3d`")),
    request_body(content = TryOnUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload stored", body = TryOnAcceptedResponse),
        (status = 400, description = "Missing, empty, oversized or non-image files", body = Error),
        (status = 404, description = "Unknown try-on mode", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tryon"],
    operation_id = "submitTryOn"
)]
#[post("/{mode}")]
pub async fn submit(
    state: web::Data<HttpState>,
    mode: web::Path<String>,
    payload: Multipart,
) -> ApiResult<web::Json<TryOnAcceptedResponse>> {
    let mode = parse_mode(&mode)?;
    let submission = read_tryon_submission(mode, payload, state.upload_limits).await?;
    let accepted = state.tryon_command.submit(submission).await?;
    Ok(web::Json(accepted.into()))
}

/// Report whether a result exists for a request.
#[utoipa::path(
    get,
    path = "/api/tryon/{mode}/result/{requestId}",
    params(
        ("mode" = String, Path, description = "Try-on flavour: `2d` or `3d`"),
        ("requestId" = String, Path, description = "Identifier returned by the upload")
    ),
    responses(
        (status = 200, description = "Processing or completed", body = TryOnStatusResponse),
        (status = 400, description = "Malformed request id", body = Error),
        (status = 404, description = "Unknown try-on mode", body = Error),
        (status = 500, description = "Result document unreadable", body = Error)
    ),
    tags = ["tryon"],
    operation_id = "tryOnStatus"
)]
#[get("/{mode}/result/{request_id}")]
pub async fn status(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<TryOnStatusResponse>> {
    let (mode, id) = parse_target(path)?;
    let outcome = state.tryon_query.status(mode, &id).await?;
    Ok(web::Json(TryOnStatusResponse::new(outcome, &id)))
}

/// Serve the result image, or the placeholder while none exists.
#[utoipa::path(
    get,
    path = "/api/tryon/{mode}/result/{requestId}/preview",
    params(
        ("mode" = String, Path, description = "Try-on flavour: `2d` or `3d`"),
        ("requestId" = String, Path, description = "Identifier returned by the upload")
    ),
    responses(
        (status = 200, description = "PNG image", content_type = "image/png",
            headers(("Cache-Control" = String, description = "Cacheable for results, no-store for placeholders"))),
        (status = 400, description = "Malformed request id", body = Error),
        (status = 404, description = "No result image and no placeholder", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tryon"],
    operation_id = "tryOnPreview"
)]
#[get("/{mode}/result/{request_id}/preview")]
pub async fn preview(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (mode, id) = parse_target(path)?;
    let image = state.tryon_query.preview(mode, &id).await?;
    let cache = match image.source {
        PreviewSource::Result => result_image_header(),
        PreviewSource::Placeholder => no_store_header(),
    };
    Ok(HttpResponse::Ok()
        .content_type(ContentType::png())
        .insert_header(cache)
        .body(image.bytes))
}

#[cfg(test)]
mod tests;
