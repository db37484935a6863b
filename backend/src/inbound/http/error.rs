//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into one JSON envelope with a matching status code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::{
    CredentialsValidationError, Error, ErrorCode, TRACE_ID_HEADER, TryOnValidationError,
};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent in place of internal error details.
pub const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(REDACTED_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(trace_id = ?self.trace_id(), message = self.message(), "internal error");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(err.to_string())
    }
}

impl From<TryOnValidationError> for Error {
    fn from(err: TryOnValidationError) -> Self {
        match &err {
            TryOnValidationError::UnknownMode(mode) => {
                Error::not_found("unknown try-on mode").with_details(json!({ "mode": mode }))
            }
            TryOnValidationError::NotAnImage { role }
            | TryOnValidationError::EmptyImage { role }
            | TryOnValidationError::ImageTooLarge { role, .. } => Error::invalid_request(
                err.to_string(),
            )
            .with_details(json!({ "field": role.form_field() })),
            TryOnValidationError::InvalidRequestId | TryOnValidationError::MissingImage => {
                Error::invalid_request(err.to_string())
            }
        }
    }
}

impl From<CredentialsValidationError> for Error {
    fn from(err: CredentialsValidationError) -> Self {
        match &err {
            CredentialsValidationError::MissingFields => Error::invalid_request(err.to_string()),
            CredentialsValidationError::InvalidField { field, reason } => {
                Error::invalid_request(reason.to_string()).with_details(json!({ "field": field }))
            }
        }
    }
}
