//! # Client Configuration
//!
//! Where the API lives, how long to wait for it, and who may log in.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_API_URL=https://api.example.com                            │
//! │     CATALOG_ALLOWED_EMAIL=admin@example.com                            │
//! │     CATALOG_TIMEOUT_SECS=10                                            │
//! │     CATALOG_PAGE_SIZE=10                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/catalog-console/client.toml (Linux)                      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000/api, 10 s timeout                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3000/api"
//! timeout_secs = 10
//!
//! [auth]
//! allowed_email = "symansalman@gmail.com"
//!
//! [display]
//! page_size = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_core::{DEFAULT_ALLOWED_EMAIL, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Environment variable selecting the API base URL.
pub const ENV_API_URL: &str = "CATALOG_API_URL";
/// Environment variable overriding the login allow-list address.
pub const ENV_ALLOWED_EMAIL: &str = "CATALOG_ALLOWED_EMAIL";
/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "CATALOG_TIMEOUT_SECS";
/// Environment variable overriding the display page size.
pub const ENV_PAGE_SIZE: &str = "CATALOG_PAGE_SIZE";

/// Built-in API location used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

// =============================================================================
// API Settings
// =============================================================================

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

/// Login policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// The single address allowed to log in.
    #[serde(default = "default_allowed_email")]
    pub allowed_email: String,
}

fn default_allowed_email() -> String {
    DEFAULT_ALLOWED_EMAIL.to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            allowed_email: default_allowed_email(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// View-layer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Page size `P` used by the pagination summary.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    /// Configuration pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`client.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults (plus environment) if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_overrides(|key| std::env::var(key).ok());
            if config.validate().is_err() {
                config = Self::default();
            }
            config
        })
    }

    /// Parses a TOML file.
    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = url::Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.display.page_size == 0 {
            return Err(ClientError::Config(
                "page_size must be greater than 0".into(),
            ));
        }

        if !self.auth.allowed_email.contains('@') {
            return Err(ClientError::Config(format!(
                "allowed_email is not an email address: {}",
                self.auth.allowed_email
            )));
        }

        Ok(())
    }

    /// Applies overrides from an environment-like lookup.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(email) = lookup(ENV_ALLOWED_EMAIL) {
            self.auth.allowed_email = email;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            match size.parse::<u32>() {
                Ok(size) => self.display.page_size = size,
                Err(_) => warn!(value = %size, "Ignoring invalid {}", ENV_PAGE_SIZE),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "catalog", "catalog-console")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }
}
