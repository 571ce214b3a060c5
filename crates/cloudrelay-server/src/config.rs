//! Server configuration.
//!
//! Configuration is optional. It is read from `--config <path>` when given, otherwise
//! from `~/.config/cloudrelay/config.toml` if that file exists. Every field has a
//! default, so an empty file (or no file) is valid.
//!
//! ## Example Configuration
//!
//! ```toml
//! base_url = "https://api.cloudflare.com/client/v4"
//! credential_env = "CLOUDFLARE_API_TOKEN"
//! timeout_seconds = 30
//!
//! [rate_limit]
//! capacity = 100
//! refill_per_second = 10.0
//!
//! [audit]
//! path = "/var/log/cloudrelay/audit.jsonl"
//! ```
//!
//! The credential itself is never stored in the file; only the name of the environment
//! variable holding it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use cloudrelay_client::{DEFAULT_BASE_URL, GatewayConfig};
use cloudrelay_guard::RateLimitConfig;

use crate::error::{Result, ServerError};

/// Default environment variable holding the API token.
pub const DEFAULT_CREDENTIAL_ENV: &str = "CLOUDFLARE_API_TOKEN";

const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Server configuration loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// API root (default: the production v4 endpoint)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable the credential is read from (default: `CLOUDFLARE_API_TOKEN`)
    #[serde(default = "default_credential_env")]
    pub credential_env: String,

    /// Per-request timeout (default: 30)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

/// Where audit lines go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Append to this file instead of writing to stderr.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            credential_env: default_credential_env(),
            timeout_seconds: default_timeout_seconds(),
            rate_limit: RateLimitConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_credential_env() -> String {
    DEFAULT_CREDENTIAL_ENV.to_string()
}

const fn default_timeout_seconds() -> u64 {
    30
}

impl ServerConfig {
    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default location
    /// is used if present and defaults apply otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit file doesn't exist or can't be read
    /// - Deserialization fails
    /// - Validation fails
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        Self::from_file(&path)
    }

    /// Reads and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        Ok(config)
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                ServerError::Config("Failed to determine config directory".to_string())
            })?
            .join("cloudrelay");

        Ok(config_dir.join("config.toml"))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` or `credential_env` is empty
    /// - `timeout_seconds` is zero or above 600
    /// - The rate limit is unusable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ServerError::Config("base_url must not be empty".to_string()));
        }

        if self.credential_env.trim().is_empty() {
            return Err(ServerError::Config(
                "credential_env must name an environment variable".to_string(),
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ServerError::Config(format!(
                "timeout_seconds must be between 1 and {MAX_TIMEOUT_SECONDS}"
            )));
        }

        self.rate_limit.validate()?;

        Ok(())
    }

    /// Reads the credential from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::MissingCredential`] if the variable is unset or blank.
    pub fn credential(&self) -> Result<SecretString> {
        self.credential_from(|name| std::env::var(name).ok())
    }

    fn credential_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<SecretString> {
        match lookup(&self.credential_env) {
            Some(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
            _ => Err(ServerError::MissingCredential(self.credential_env.clone())),
        }
    }

    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.timeout_seconds))
            .build()
    }
}
