//! Account API handlers.
//!
//! ```text
//! POST /api/auth/signup {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /api/auth/login {"email":"ada@example.com","password":"pw"}
//! POST /api/auth/logout
//! GET  /api/auth/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    CredentialsValidationError, Error, ErrorCode, LoginCredentials, SignupDetails, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned alongside a newly created user.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";

/// Signup request body for `POST /api/auth/signup`.
///
/// Absent fields deserialise as empty strings so they surface as the
/// missing-fields validation error rather than a JSON shape error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = CredentialsValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Body returned by a successful signup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub user: User,
}

/// Body carrying the authenticated user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Missing fields or duplicate email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details = SignupDetails::try_from(payload.into_inner())?;
    let user = state.signup.signup(&details).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        message: SIGNUP_SUCCESS_MESSAGE.to_owned(),
        user,
    }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the user bound to the session cookie.
///
/// A session naming a user that no longer exists is cleared and treated as
/// anonymous.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "No active session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    match state.profile.fetch_profile(&user_id).await {
        Ok(user) => Ok(web::Json(UserResponse { user })),
        Err(err) if err.code() == ErrorCode::NotFound => {
            debug!(%user_id, "session names an unknown user");
            session.purge();
            Err(Error::unauthorized("login required"))
        }
        Err(err) => Err(err),
    }
}
