//! Backend entry-point: loads configuration, prepares storage and persistence,
//! and runs the HTTP server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, TryOnConfig, create_server};
use tryon_backend::inbound::http::health::HealthState;
use tryon_backend::inbound::http::multipart::UploadLimits;
use tryon_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use tryon_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tryon_backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let tryon = TryOnConfig {
        uploads_dir: settings.uploads_dir(),
        placeholder_path: settings.placeholder_path(),
        upload_limits: UploadLimits::new(
            settings.max_upload_bytes().map_err(std::io::Error::other)?,
        ),
        processing_mode: settings.processing_mode().map_err(std::io::Error::other)?,
    };

    let mut config = ServerConfig::new(session, bind_addr, tryon);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.database_pool_size());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "try-on backend listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
