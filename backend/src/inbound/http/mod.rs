//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod multipart;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tryon;

pub use error::ApiResult;

use actix_web::{HttpRequest, web};

use crate::domain::Error;

/// Register the account and try-on scopes along with their extractor
/// configuration.
///
/// Session middleware is left to the caller so tests and the server can
/// choose their own cookie settings.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api/auth")
                .service(auth::signup)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::current_session),
        )
        .service(
            web::scope("/api/tryon")
                .service(tryon::submit)
                .service(tryon::status)
                .service(tryon::preview),
        );
}

/// JSON extractor settings that report malformed bodies in the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}
