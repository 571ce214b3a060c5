//! Error types for the gateway.
//!
//! Every message produced here is safe to show to the AI host: upstream error text is
//! replaced by fixed, code-mapped summaries, and no variant ever carries the credential.

use cloudrelay_guard::{QueryGuardError, RejectReason, VaultError};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors that can occur when calling the upstream API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The upstream API answered with `success: false` or an unusable error status.
    ///
    /// `messages` holds only safe, code-mapped text, deduplicated in order.
    #[error("Upstream API error: {}", .messages.join("; "))]
    Upstream {
        messages: SmallVec<[String; 2]>,
        /// HTTP status of the response.
        status: u16,
    },

    /// Network or connection failure before a response was received.
    ///
    /// The message is produced locally by the HTTP client.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not in the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(&'static str),

    /// The GraphQL query was refused before sending.
    #[error("Query rejected: {0}")]
    RejectedQuery(RejectReason),

    /// The GraphQL variables payload was refused before sending.
    #[error("Invalid variables: variables must be a JSON object of at most 10000 characters")]
    InvalidVariables,

    /// Tool arguments did not match the operation's parameters.
    #[error("Invalid parameters: {0}")]
    Validation(String),

    /// The credential could not be revealed or used.
    #[error("Credential error: {0}")]
    Credential(#[from] VaultError),

    /// Client configuration issue, such as an unparsable base URL.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Convenience constructor for a single safe upstream message.
    pub fn upstream(message: impl Into<String>, status: u16) -> Self {
        let mut messages = SmallVec::new();
        messages.push(message.into());
        Self::Upstream { messages, status }
    }

    /// Whether this error was decided before any network traffic.
    #[must_use]
    pub const fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            Self::RejectedQuery(_)
                | Self::InvalidVariables
                | Self::Validation(_)
                | Self::Configuration(_)
        )
    }

    /// Whether the upstream API reported the failure.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

impl From<QueryGuardError> for GatewayError {
    fn from(err: QueryGuardError) -> Self {
        match err {
            QueryGuardError::RejectedQuery(reason) => Self::RejectedQuery(reason),
            QueryGuardError::InvalidVariables => Self::InvalidVariables,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport("request timed out".to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_upstream_display_joins_messages() {
        let err = GatewayError::Upstream {
            messages: SmallVec::from_vec(vec!["first".to_string(), "second".to_string()]),
            status: 400,
        };
        assert_eq!(err.to_string(), "Upstream API error: first; second");
        assert!(err.is_upstream());
        assert!(!err.is_local_rejection());
    }

    #[test]
    fn test_query_guard_errors_convert() {
        let err: GatewayError = QueryGuardError::RejectedQuery(RejectReason::Mutation).into();
        assert!(matches!(err, GatewayError::RejectedQuery(RejectReason::Mutation)));
        assert!(err.is_local_rejection());

        let err: GatewayError = QueryGuardError::InvalidVariables.into();
        assert!(matches!(err, GatewayError::InvalidVariables));
    }
}
