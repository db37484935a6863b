//! Shared cache-control policies for HTTP handlers.

use actix_web::http::header;

/// Finished result images never change once written.
pub const RESULT_IMAGE_CACHE: &str = "public, max-age=86400";

/// Placeholders must not be cached so the real result shows up once ready.
pub const NO_STORE: &str = "no-store";

/// Header tuple for a cacheable result image.
pub const fn result_image_header() -> (header::HeaderName, &'static str) {
    (header::CACHE_CONTROL, RESULT_IMAGE_CACHE)
}

/// Header tuple for responses that must never be cached.
pub const fn no_store_header() -> (header::HeaderName, &'static str) {
    (header::CACHE_CONTROL, NO_STORE)
}
