//! Client configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Backend address used when `PORTAL_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Portal client configuration
///
/// Loaded from `PORTAL_`-prefixed environment variables:
///
/// * `PORTAL_API_URL` - Backend base URL (default: http://localhost:5000)
/// * `PORTAL_SESSION_FILE` - Where the session is persisted (default: platform data dir)
/// * `PORTAL_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL
    pub api_url: String,
    /// Session file override
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("log_level", "info")?
            .add_source(config::Environment::with_prefix("PORTAL"))
            .build()?
            .try_deserialize()
    }

    /// Points the client at another backend
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Resolves the session file, falling back to the platform data directory
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("insure-portal")
                .join("session.json")
        })
    }
}
