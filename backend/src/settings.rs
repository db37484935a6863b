//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `TRYON_*` environment variables, command-line flags and an
//! optional config file; anything unset falls back to the defaults below.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::multipart::DEFAULT_MAX_UPLOAD_BYTES;
use crate::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_PLACEHOLDER_PATH: &str = "public/placeholder-result.png";
const DEFAULT_PROCESSING_MODE: &str = "external";

/// How uploaded submissions are turned into results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Results are produced by a separate process writing into the uploads
    /// directory.
    #[default]
    External,
    /// The user photo is echoed back as the result.
    Passthrough,
}

/// Raised for an unrecognised `processing_mode`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown processing mode '{0}'; expected external or passthrough")]
pub struct ProcessingModeParseError(String);

impl FromStr for ProcessingMode {
    type Err = ProcessingModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "external" => Ok(Self::External),
            "passthrough" => Ok(Self::Passthrough),
            _ => Err(ProcessingModeParseError(s.to_owned())),
        }
    }
}

/// Errors raised while resolving loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    ProcessingMode(#[from] ProcessingModeParseError),
    #[error("max_upload_bytes must be greater than zero")]
    ZeroUploadLimit,
}

/// Top-level service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRYON")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// Root directory for per-request upload folders.
    #[ortho_config(default = PathBuf::from(DEFAULT_UPLOADS_DIR))]
    pub uploads_dir: PathBuf,
    /// Image served while no result exists.
    #[ortho_config(default = PathBuf::from(DEFAULT_PLACEHOLDER_PATH))]
    pub placeholder_path: PathBuf,
    /// Per-file upload limit in bytes.
    #[ortho_config(default = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
    /// `external` or `passthrough`.
    #[ortho_config(default = String::from(DEFAULT_PROCESSING_MODE))]
    pub processing_mode: String,
    /// PostgreSQL URL for account storage; accounts stay in memory when unset.
    pub database_url: Option<String>,
    /// Maximum open database connections.
    #[ortho_config(default = DEFAULT_POOL_SIZE)]
    pub database_pool_size: u32,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads_dir.clone()
    }

    pub fn placeholder_path(&self) -> PathBuf {
        self.placeholder_path.clone()
    }

    pub fn max_upload_bytes(&self) -> Result<usize, SettingsError> {
        match self.max_upload_bytes {
            0 => Err(SettingsError::ZeroUploadLimit),
            limit => Ok(limit),
        }
    }

    pub fn processing_mode(&self) -> Result<ProcessingMode, SettingsError> {
        Ok(self.processing_mode.parse()?)
    }

    /// Database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn database_pool_size(&self) -> u32 {
        self.database_pool_size
    }
}
