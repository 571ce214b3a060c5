//! # cloudrelay-client
//!
//! Guarded, read-only gateway to the Cloudflare v4 API.
//!
//! - [`catalog`]: declarative table of every exposed operation and the argument binder
//! - [`Gateway`]: sends bound requests through the rate limiter, credential vault and
//!   audit sink from `cloudrelay-guard`
//! - [`envelope`]: response envelope parsing and the safe error-message table
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cloudrelay_client::{Gateway, GatewayConfig, catalog};
//! use cloudrelay_guard::{AuditSink, CredentialVault, RateLimitConfig, RateLimiter};
//! use secrecy::SecretString;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let gateway = Gateway::new(
//!     &GatewayConfig::default(),
//!     Arc::new(RateLimiter::new(RateLimitConfig::default())?),
//!     Arc::new(CredentialVault::new(SecretString::from("api-token".to_string()))?),
//!     Arc::new(AuditSink::stderr()),
//! )?;
//!
//! let args = json!({ "zone_id": "023e105f4ecef8ad9ca31a8372d0c353" });
//! let spec = catalog::find("get_zone").ok_or_else(|| anyhow::anyhow!("unknown operation"))?;
//! let request = catalog::bind(spec, &args)?;
//! let zone = gateway.send(&request, Some(&args)).await?.into_value();
//! println!("{}", zone["name"]);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod gateway;

pub use catalog::{BoundRequest, OperationSpec, ParamKind, ParamLocation, ParamSpec};
pub use envelope::{ApiResponse, GENERIC_UPSTREAM_MESSAGE, ResultInfo, safe_message};
pub use error::GatewayError;
pub use gateway::{DEFAULT_BASE_URL, GRAPHQL_OPERATION, Gateway, GatewayConfig};
