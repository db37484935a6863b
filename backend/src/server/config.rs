//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tryon_backend::inbound::http::multipart::UploadLimits;
use tryon_backend::inbound::http::session_config::SessionSettings;
use tryon_backend::outbound::persistence::DbPool;
use tryon_backend::settings::ProcessingMode;

/// Where try-on artifacts live and how they are processed.
#[derive(Debug, Clone)]
pub struct TryOnConfig {
    pub uploads_dir: PathBuf,
    pub placeholder_path: PathBuf,
    pub upload_limits: UploadLimits,
    pub processing_mode: ProcessingMode,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tryon: TryOnConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, tryon: TryOnConfig) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            tryon,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for account storage.
    ///
    /// Without one, accounts live in memory and vanish on restart.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
