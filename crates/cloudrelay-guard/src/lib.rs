//! # cloudrelay-guard
//!
//! Protective mechanisms applied to every outbound cloudrelay request.
//!
//! - [`RateLimiter`]: token-bucket admission gate shared by all concurrent calls
//! - [`CredentialVault`]: keeps the bearer credential XOR-masked in memory
//! - [`AuditSink`]: emits one redacted JSON line per call attempt
//! - [`query`]: static read-only filter for free-form GraphQL queries
//!
//! ## Example
//!
//! ```no_run
//! use cloudrelay_guard::{AuditSink, CredentialVault, Outcome, RateLimitConfig, RateLimiter};
//! use secrecy::{ExposeSecret, SecretString};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let limiter = RateLimiter::new(RateLimitConfig::default())?;
//! let vault = CredentialVault::new(SecretString::from("api-token".to_string()))?;
//! let audit = AuditSink::stderr();
//!
//! limiter.acquire().await;
//! let token = vault.reveal()?;
//! // ... use token.expose_secret() for exactly one request ...
//! drop(token);
//!
//! audit.record("list_zones", None, Outcome::Success, None, Duration::from_millis(42));
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod query;
pub mod rate_limit;
pub mod vault;

pub use audit::{AuditBuffer, AuditRecord, AuditSink, Outcome, REDACTED, is_sensitive_key, redact};
pub use query::{QueryGuardError, RejectReason, validate_query, validate_variables};
pub use rate_limit::{RateLimitConfig, RateLimitError, RateLimiter};
pub use vault::{CredentialVault, VaultError};
