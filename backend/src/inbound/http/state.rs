//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, SignupService, TryOnCommand, TryOnQuery, UserProfileQuery,
};
use crate::inbound::http::multipart::UploadLimits;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub tryon_command: Arc<dyn TryOnCommand>,
    pub tryon_query: Arc<dyn TryOnQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub tryon_command: Arc<dyn TryOnCommand>,
    pub tryon_query: Arc<dyn TryOnQuery>,
    pub upload_limits: UploadLimits,
}

impl HttpState {
    /// Construct state from a ports bundle and the upload limits.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use tryon_backend::domain::{AccountService, TryOnService};
    /// use tryon_backend::domain::ports::FixturePasswordHasher;
    /// use tryon_backend::inbound::http::multipart::UploadLimits;
    /// use tryon_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use tryon_backend::outbound::persistence::MemoryUserRepository;
    /// use tryon_backend::outbound::processing::ExternalProcessor;
    /// use tryon_backend::outbound::storage::FsTryOnStore;
    ///
    /// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
    /// let accounts = Arc::new(AccountService::new(
    ///     Arc::new(MemoryUserRepository::default()),
    ///     Arc::new(FixturePasswordHasher),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let store = Arc::new(FsTryOnStore::open("uploads", None)?);
    /// let tryon = Arc::new(TryOnService::new(store, Arc::new(ExternalProcessor), Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         signup: accounts.clone(),
    ///         login: accounts.clone(),
    ///         profile: accounts,
    ///         tryon_command: tryon.clone(),
    ///         tryon_query: tryon,
    ///     },
    ///     UploadLimits::default(),
    /// );
    /// # let _ = state;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(ports: HttpStatePorts, upload_limits: UploadLimits) -> Self {
        let HttpStatePorts {
            signup,
            login,
            profile,
            tryon_command,
            tryon_query,
        } = ports;
        Self {
            signup,
            login,
            profile,
            tryon_command,
            tryon_query,
            upload_limits,
        }
    }
}
