//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer together
//! with the session cookie security scheme. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::auth::{LoginRequest, SignupRequest, SignupResponse, UserResponse};
use crate::inbound::http::tryon::{
    TryOnAcceptedResponse, TryOnStatusResponse, TryOnUploadForm,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Try-on backend API",
        description = "Accounts, two-image try-on uploads, result polling and previews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::tryon::submit,
        crate::inbound::http::tryon::status,
        crate::inbound::http::tryon::preview,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        SignupRequest,
        LoginRequest,
        SignupResponse,
        UserResponse,
        TryOnUploadForm,
        TryOnAcceptedResponse,
        TryOnStatusResponse,
    )),
    tags(
        (name = "auth", description = "Signup and cookie sessions"),
        (name = "tryon", description = "Try-on uploads and results"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("/api/auth/signup")]
    #[case("/api/auth/login")]
    #[case("/api/auth/logout")]
    #[case("/api/auth/session")]
    #[case("/api/tryon/{mode}")]
    #[case("/api/tryon/{mode}/result/{requestId}")]
    #[case("/api/tryon/{mode}/result/{requestId}/preview")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path), "{path}");
    }

    #[rstest]
    fn user_schema_omits_credentials() {
        let fields = object_fields("User");
        assert!(fields.iter().any(|field| field == "createdAt"));
        assert!(!fields.iter().any(|field| field.contains("password")));
    }

    #[rstest]
    fn error_schema_has_envelope_fields() {
        let fields = object_fields("Error");
        for expected in ["code", "message", "traceId", "details"] {
            assert!(fields.iter().any(|field| field == expected), "{expected}");
        }
    }
}
