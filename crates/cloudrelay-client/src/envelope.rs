//! Upstream response envelope and safe error mapping.
//!
//! Every v4 REST response, successful or not, is wrapped as
//! `{ success, errors, messages, result, result_info }`. Error text from the upstream
//! body is never relayed; each error code is mapped through a fixed table instead.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::error::GatewayError;

/// Fallback for error codes missing from the safe-message table.
pub const GENERIC_UPSTREAM_MESSAGE: &str = "The upstream API reported an error";

/// Standard response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<Value>,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// An entry of the envelope's `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    /// Upstream text. Never surfaced to callers.
    #[serde(default)]
    pub message: String,
}

/// Pagination details for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Cursor for cursor-paginated endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Successful payload relayed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_info: Option<ResultInfo>,
}

impl ApiResponse {
    /// The JSON handed back to the tool caller: the bare `result`, or
    /// `{ result, result_info }` when the endpoint is paginated.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self.result_info {
            None => self.result,
            Some(info) => serde_json::json!({
                "result": self.result,
                "result_info": info,
            }),
        }
    }
}

/// GraphQL responses use `{ data, errors }` instead of the REST envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
}

/// Safe replacement text for an upstream error code.
#[must_use]
pub const fn safe_message(code: i64) -> &'static str {
    match code {
        1000 => "Invalid user or account for this request",
        1001 => "Invalid request",
        1003 => "Invalid or missing zone identifier",
        1004 => "Invalid or missing account identifier",
        6003 => "Invalid request headers",
        6007 => "Malformed request body",
        6100 | 6102 | 6103 => "Invalid or malformed authentication credentials",
        7000 => "No route exists for the requested endpoint",
        7003 => "The requested resource was not found or its identifier is invalid",
        9103 | 9106 | 9109 => "Authentication failed: the API token is missing or invalid",
        10000 => "Authentication error: the API token is invalid or lacks permission",
        10001 => "The API token does not have access to this resource",
        10014 => "The API token has expired",
        81044 => "DNS record not found",
        _ => GENERIC_UPSTREAM_MESSAGE,
    }
}

/// Safe replacement text for an error status with no parsable envelope.
#[must_use]
pub fn status_message(status: StatusCode) -> String {
    match status.as_u16() {
        401 => "Authentication failed: the API token is missing or invalid".to_string(),
        403 => "The API token does not have permission for this request".to_string(),
        404 => "The requested resource was not found".to_string(),
        429 => "The upstream API rate limit was exceeded".to_string(),
        500..=599 => format!("The upstream API is unavailable (HTTP {})", status.as_u16()),
        code => format!("The upstream API returned HTTP {code}"),
    }
}

/// Maps each error code to its safe message, deduplicated in first-seen order.
#[must_use]
pub fn safe_messages(errors: &[ApiMessage]) -> SmallVec<[String; 2]> {
    let mut messages: SmallVec<[String; 2]> = SmallVec::new();
    for error in errors {
        let message = safe_message(error.code);
        if !messages.iter().any(|m| m == message) {
            messages.push(message.to_string());
        }
    }
    if messages.is_empty() {
        messages.push(GENERIC_UPSTREAM_MESSAGE.to_string());
    }
    messages
}

/// Classifies a REST response body.
///
/// # Errors
///
/// - [`GatewayError::Upstream`] when the envelope reports failure, or the body is not
///   an envelope and the status is an error
/// - [`GatewayError::InvalidResponse`] when a success status carries no envelope
pub fn interpret_envelope(status: StatusCode, body: &[u8]) -> Result<ApiResponse, GatewayError> {
    match serde_json::from_slice::<Envelope>(body) {
        Ok(envelope) if envelope.success => Ok(ApiResponse {
            result: envelope.result,
            result_info: envelope.result_info,
        }),
        Ok(envelope) => {
            for error in &envelope.errors {
                log::debug!("Upstream error code {} (HTTP {})", error.code, status.as_u16());
            }
            Err(GatewayError::Upstream {
                messages: safe_messages(&envelope.errors),
                status: status.as_u16(),
            })
        }
        Err(_) if !status.is_success() => Err(GatewayError::upstream(
            status_message(status),
            status.as_u16(),
        )),
        Err(e) => {
            log::warn!("Upstream returned a body that is not a response envelope: {e}");
            Err(GatewayError::InvalidResponse(
                "the upstream API returned a body that is not a response envelope",
            ))
        }
    }
}

/// Classifies a GraphQL response body.
///
/// # Errors
///
/// - [`GatewayError::Upstream`] when the response lists errors or has an error status
/// - [`GatewayError::InvalidResponse`] when a success status carries unparsable JSON
pub fn interpret_graphql(status: StatusCode, body: &[u8]) -> Result<Value, GatewayError> {
    match serde_json::from_slice::<GraphqlResponse>(body) {
        Ok(response) => match response.errors {
            Some(errors) if !errors.is_empty() => Err(GatewayError::upstream(
                format!(
                    "The analytics query was rejected by the upstream API ({} error(s))",
                    errors.len()
                ),
                status.as_u16(),
            )),
            _ if !status.is_success() => Err(GatewayError::upstream(
                status_message(status),
                status.as_u16(),
            )),
            _ => Ok(response.data),
        },
        Err(_) if !status.is_success() => Err(GatewayError::upstream(
            status_message(status),
            status.as_u16(),
        )),
        Err(_) => Err(GatewayError::InvalidResponse(
            "the upstream API returned a body that is not a GraphQL response",
        )),
    }
}
