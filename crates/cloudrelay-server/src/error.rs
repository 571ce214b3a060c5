//! Error types for the cloudrelay server.

use thiserror::Error;

use cloudrelay_client::GatewayError;
use cloudrelay_guard::{RateLimitError, VaultError};

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// I/O error (audit file, stdio transport).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid rate limit: {0}")]
    RateLimit(#[from] RateLimitError),

    /// The credential environment variable is unset or empty.
    #[error("No API credential found: set the {0} environment variable")]
    MissingCredential(String),

    #[error("Credential error: {0}")]
    Credential(#[from] VaultError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// MCP transport or protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// Result type alias using `ServerError`.
pub type Result<T> = std::result::Result<T, ServerError>;
