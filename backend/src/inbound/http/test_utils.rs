//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    MockLoginService, MockSignupService, MockTryOnCommand, MockTryOnQuery, MockUserProfileQuery,
};
use crate::domain::{EmailAddress, PersonName, User, UserId};
use crate::inbound::http::multipart::UploadLimits;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

pub const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Session middleware with a fresh key and the `Secure` flag disabled so
/// cookies round-trip over plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(super::session::SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

pub fn fixture_user() -> User {
    User::new(
        UserId::new(FIXTURE_USER_ID).expect("fixture id"),
        PersonName::new("Ada Lovelace").expect("fixture name"),
        EmailAddress::new("ada@example.com").expect("fixture email"),
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0)
            .single()
            .expect("fixture timestamp"),
    )
}

/// Mock ports with no expectations; tests configure only what they touch.
#[derive(Default)]
pub struct MockPorts {
    pub signup: MockSignupService,
    pub login: MockLoginService,
    pub profile: MockUserProfileQuery,
    pub tryon_command: MockTryOnCommand,
    pub tryon_query: MockTryOnQuery,
}

impl MockPorts {
    pub fn into_state(self, upload_limits: UploadLimits) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                signup: Arc::new(self.signup),
                login: Arc::new(self.login),
                profile: Arc::new(self.profile),
                tryon_command: Arc::new(self.tryon_command),
                tryon_query: Arc::new(self.tryon_query),
            },
            upload_limits,
        )
    }
}
