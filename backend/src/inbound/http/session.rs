//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps Actix sessions so handlers only deal with domain-friendly
//! operations: remember a user after login, look them up, forget them.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

/// Name of the encrypted session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated user's id, rotating the session first.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id, if any.
    ///
    /// A cookie carrying a malformed id is treated as anonymous.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(id.and_then(|raw| match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop all session state; the cookie is expired on the response.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(Cookie::into_owned)
            .expect("session cookie set")
    }

    async fn login(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(USER).expect("fixture id");
        session.persist_user(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    async fn logout(session: SessionContext) -> HttpResponse {
        session.purge();
        HttpResponse::NoContent().finish()
    }

    async fn tamper(session: actix_session::Session) -> Result<HttpResponse, Error> {
        session
            .insert(USER_ID_KEY, "not-a-uuid")
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(HttpResponse::Ok().finish())
    }

    macro_rules! session_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(crate::inbound::http::test_utils::test_session_middleware())
                    .route("/login", web::get().to(login))
                    .route("/whoami", web::get().to(whoami))
                    .route("/logout", web::get().to(logout))
                    .route("/tamper", web::get().to(tamper)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = session_app!();

        let login_res =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = session_cookie(&login_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, USER);
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = session_app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = session_app!();
        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn purge_expires_the_cookie() {
        let app = session_app!();
        let login_res =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = session_cookie(&login_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let removal = session_cookie(&res);
        assert_eq!(removal.value(), "");
    }
}
