//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use tryon_backend::domain::ports::{TryOnProcessor, TryOnStore, UserRepository};
use tryon_backend::domain::{AccountService, TryOnService};
use tryon_backend::inbound::http::state::{HttpState, HttpStatePorts};
use tryon_backend::outbound::persistence::{DieselUserRepository, MemoryUserRepository};
use tryon_backend::outbound::processing::{ExternalProcessor, PassthroughProcessor};
use tryon_backend::outbound::security::Argon2PasswordHasher;
use tryon_backend::outbound::storage::{FsTryOnStore, StorageInitError};
use tryon_backend::settings::ProcessingMode;

use super::ServerConfig;

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            warn!("no database configured; accounts are kept in memory");
            Arc::new(MemoryUserRepository::default())
        }
    }
}

fn build_processor(mode: ProcessingMode, store: &Arc<dyn TryOnStore>) -> Arc<dyn TryOnProcessor> {
    info!(?mode, "try-on processing strategy selected");
    match mode {
        ProcessingMode::External => Arc::new(ExternalProcessor),
        ProcessingMode::Passthrough => Arc::new(PassthroughProcessor::new(Arc::clone(store))),
    }
}

/// Assemble the HTTP state from configuration.
///
/// # Errors
/// Fails when the uploads directory cannot be created or opened.
pub(crate) fn build_http_state(config: &ServerConfig) -> Result<HttpState, StorageInitError> {
    let clock = Arc::new(DefaultClock);
    let accounts = Arc::new(AccountService::new(
        build_user_repository(config),
        Arc::new(Argon2PasswordHasher),
        clock.clone(),
    ));

    let tryon_config = &config.tryon;
    let placeholder = Some(tryon_config.placeholder_path.clone());
    let store: Arc<dyn TryOnStore> =
        Arc::new(FsTryOnStore::open(&tryon_config.uploads_dir, placeholder)?);
    let processor = build_processor(tryon_config.processing_mode, &store);
    let tryon = Arc::new(TryOnService::new(store, processor, clock));

    Ok(HttpState::new(
        HttpStatePorts {
            signup: accounts.clone(),
            login: accounts.clone(),
            profile: accounts,
            tryon_command: tryon.clone(),
            tryon_query: tryon,
        },
        tryon_config.upload_limits,
    ))
}
