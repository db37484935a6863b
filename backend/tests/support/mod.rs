//! Shared helpers for HTTP integration tests.
//!
//! Builds the full application from library pieces against a temporary
//! uploads directory and an in-memory account store.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::App;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;
use image::{ImageFormat, Rgb, RgbImage};
use mockable::DefaultClock;
use tempfile::TempDir;

use tryon_backend::Trace;
use tryon_backend::domain::ports::{PasswordHasher, TryOnProcessor, TryOnStore};
use tryon_backend::domain::{AccountService, TryOnService};
use tryon_backend::inbound::http::configure_api;
use tryon_backend::inbound::http::multipart::UploadLimits;
use tryon_backend::inbound::http::session::SESSION_COOKIE_NAME;
use tryon_backend::inbound::http::state::{HttpState, HttpStatePorts};
use tryon_backend::outbound::persistence::MemoryUserRepository;
use tryon_backend::outbound::processing::{ExternalProcessor, PassthroughProcessor};
use tryon_backend::outbound::storage::FsTryOnStore;
use tryon_backend::settings::ProcessingMode;

pub const BOUNDARY: &str = "integration-boundary";

/// Uploads directory plus the state wired against it.
pub struct Harness {
    pub uploads: TempDir,
    pub state: HttpState,
}

pub struct HarnessOptions<'a> {
    pub processing: ProcessingMode,
    pub placeholder: Option<&'a [u8]>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub max_upload_bytes: usize,
}

impl Default for HarnessOptions<'_> {
    fn default() -> Self {
        Self {
            processing: ProcessingMode::External,
            placeholder: None,
            hasher: Arc::new(tryon_backend::domain::ports::FixturePasswordHasher),
            max_upload_bytes: 1024 * 1024,
        }
    }
}

impl Harness {
    pub fn new(options: HarnessOptions<'_>) -> Self {
        let uploads = tempfile::tempdir().expect("uploads dir");
        let placeholder_path = uploads.path().join("public").join("placeholder-result.png");
        if let Some(bytes) = options.placeholder {
            std::fs::create_dir_all(placeholder_path.parent().expect("parent"))
                .expect("placeholder dir");
            std::fs::write(&placeholder_path, bytes).expect("write placeholder");
        }
        let store: Arc<dyn TryOnStore> = Arc::new(
            FsTryOnStore::open(uploads.path().join("uploads"), Some(placeholder_path))
                .expect("open store"),
        );
        let processor: Arc<dyn TryOnProcessor> = match options.processing {
            ProcessingMode::External => Arc::new(ExternalProcessor),
            ProcessingMode::Passthrough => Arc::new(PassthroughProcessor::new(store.clone())),
        };
        let clock = Arc::new(DefaultClock);
        let accounts = Arc::new(AccountService::new(
            Arc::new(MemoryUserRepository::default()),
            options.hasher,
            clock.clone(),
        ));
        let tryon = Arc::new(TryOnService::new(store, processor, clock));
        let state = HttpState::new(
            HttpStatePorts {
                signup: accounts.clone(),
                login: accounts.clone(),
                profile: accounts,
                tryon_command: tryon.clone(),
                tryon_query: tryon,
            },
            UploadLimits::new(options.max_upload_bytes),
        );
        Self { uploads, state }
    }

    /// Directory holding the artifacts for one request.
    pub fn request_dir(&self, request_id: &str) -> std::path::PathBuf {
        self.uploads.path().join("uploads").join(request_id)
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(session)
            .wrap(Trace)
            .configure(configure_api)
    }
}

/// A small PNG so image decoding paths have real input.
pub fn png_bytes(colour: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_pixel(4, 3, Rgb(colour));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// One file part of a multipart form.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub fn multipart_body(parts: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                part.field, part.file_name, part.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub fn assert_dir_exists(path: &Path) {
    assert!(path.is_dir(), "{} should exist", path.display());
}
