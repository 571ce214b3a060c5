//! Guarded request path to the upstream API.
//!
//! [`Gateway`] is the only component that performs network I/O. Every call goes
//! through the same sequence: rate limiter, credential reveal, HTTP request, envelope
//! classification and exactly one audit record, whether the call succeeded or not.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};
use typed_builder::TypedBuilder;
use url::Url;
use zeroize::Zeroizing;

use cloudrelay_guard::{
    AuditSink, CredentialVault, Outcome, QueryGuardError, RateLimiter, validate_query,
    validate_variables,
};

use crate::catalog::{BoundRequest, HttpMethod};
use crate::envelope::{ApiResponse, interpret_envelope, interpret_graphql};
use crate::error::GatewayError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operation name recorded for GraphQL analytics queries.
pub const GRAPHQL_OPERATION: &str = "graphql_analytics_query";

const GRAPHQL_PATH: &str = "/graphql";

/// HTTP settings for [`Gateway`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct GatewayConfig {
    /// API root; operation paths are appended to its path.
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,

    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = concat!("cloudrelay/", env!("CARGO_PKG_VERSION")).to_string(), setter(into))]
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Read-only gateway to the upstream REST and GraphQL APIs.
///
/// The limiter, vault and audit sink are process-wide singletons shared with every
/// concurrent caller.
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    limiter: Arc<RateLimiter>,
    vault: Arc<CredentialVault>,
    audit: Arc<AuditSink>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .field("credential", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Builds a gateway around the shared guards.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be created.
    pub fn new(
        config: &GatewayConfig,
        limiter: Arc<RateLimiter>,
        vault: Arc<CredentialVault>,
        audit: Arc<AuditSink>,
    ) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Configuration(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(GatewayError::Configuration(format!(
                "base URL '{}' must be an http or https URL",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GatewayError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            limiter,
            vault,
            audit,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a bound catalog request and records one audit line for the attempt.
    ///
    /// `parameters` are the caller's arguments as recorded in the audit line; they are
    /// redacted before writing.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Upstream`] with safe messages when the API reports failure
    /// - [`GatewayError::Transport`] when no response was received
    /// - [`GatewayError::InvalidResponse`] when the body is not a response envelope
    pub async fn send(
        &self,
        request: &BoundRequest,
        parameters: Option<&Value>,
    ) -> Result<ApiResponse, GatewayError> {
        let started = Instant::now();
        let result = match self
            .dispatch(request.method, &request.path, &request.query, None)
            .await
        {
            Ok((status, body)) => interpret_envelope(status, &body),
            Err(e) => Err(e),
        };

        self.record(request.operation, parameters, &result, started.elapsed());
        result
    }

    /// Runs a GraphQL analytics query after the read-only filter accepts it.
    ///
    /// `variables` is the raw JSON text supplied by the caller, if any. Rejected
    /// queries are audited as failures and never reach the network. The audit record
    /// carries the parsed variables so their keys are redacted; variables text that
    /// does not parse is not recorded.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::RejectedQuery`] or [`GatewayError::InvalidVariables`] from the
    ///   query filter
    /// - any error [`Gateway::send`] can return
    pub async fn graphql(&self, query: &str, variables: Option<&str>) -> Result<Value, GatewayError> {
        let started = Instant::now();
        let variables = validate_variables(variables);
        let parameters = json!({ "query": query, "variables": variables.as_ref().ok() });

        let result = match guarded_graphql_body(query, variables) {
            Ok(body) => match self
                .dispatch(HttpMethod::Post, GRAPHQL_PATH, &[], Some(&body))
                .await
            {
                Ok((status, bytes)) => interpret_graphql(status, &bytes),
                Err(e) => Err(e),
            },
            Err(e) => {
                debug!("GraphQL query rejected before sending: {e}");
                Err(e)
            }
        };

        self.record(GRAPHQL_OPERATION, Some(&parameters), &result, started.elapsed());
        result
    }

    /// One HTTP exchange. Waits for the rate limiter and attaches the credential.
    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<(StatusCode, Vec<u8>), GatewayError> {
        let url = self.endpoint(path);

        self.limiter.acquire().await;

        let mut builder = self
            .http
            .request(method.into(), url)
            .header(AUTHORIZATION, self.authorization()?);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!("{method:?} {path}");
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("{method:?} {path} -> HTTP {}", status.as_u16());

        Ok((status, bytes.to_vec()))
    }

    /// `base_url` with `path` appended to its path component.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{path}", self.base_url.path().trim_end_matches('/'));
        url.set_path(&joined);
        url.set_query(None);
        url
    }

    /// Bearer header built from a freshly revealed credential.
    fn authorization(&self) -> Result<HeaderValue, GatewayError> {
        let credential = self.vault.reveal()?;
        let bearer = Zeroizing::new(format!("Bearer {}", credential.expose_secret()));
        let mut value = HeaderValue::from_str(&bearer).map_err(|_| {
            GatewayError::Configuration(
                "the credential contains characters not allowed in an HTTP header".to_string(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    fn record<T>(
        &self,
        operation: &str,
        parameters: Option<&Value>,
        result: &Result<T, GatewayError>,
        elapsed: Duration,
    ) {
        match result {
            Ok(_) => self
                .audit
                .record(operation, parameters, Outcome::Success, None, elapsed),
            Err(e) => {
                if !e.is_local_rejection() {
                    warn!("{operation} failed: {e}");
                }
                let summary = e.to_string();
                self.audit
                    .record(operation, parameters, Outcome::Failure, Some(&summary), elapsed);
            }
        }
    }
}

/// Request body for an accepted query. The query is checked before the variables.
fn guarded_graphql_body(
    query: &str,
    variables: Result<Map<String, Value>, QueryGuardError>,
) -> Result<Value, GatewayError> {
    validate_query(query)?;
    let variables = variables?;
    Ok(json!({ "query": query, "variables": variables }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use cloudrelay_guard::{AuditBuffer, RateLimitConfig, RejectReason};
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::catalog::{bind, find};
    use crate::envelope::safe_message;

    const ZONE: &str = "023e105f4ecef8ad9ca31a8372d0c353";
    const TOKEN: &str = "test-token-0123456789";

    fn gateway(server: &MockServer) -> (Gateway, AuditBuffer) {
        gateway_at(&format!("{}/client/v4", server.uri()))
    }

    fn gateway_at(base_url: &str) -> (Gateway, AuditBuffer) {
        let (sink, buffer) = AuditSink::in_memory();
        let config = GatewayConfig::builder().base_url(base_url).build();
        let gateway = Gateway::new(
            &config,
            Arc::new(RateLimiter::new(RateLimitConfig::default()).unwrap()),
            Arc::new(CredentialVault::new(SecretString::from(TOKEN.to_string())).unwrap()),
            Arc::new(sink),
        )
        .unwrap();
        (gateway, buffer)
    }

    fn envelope_ok(result: &Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": result,
        }))
    }

    #[tokio::test]
    async fn test_get_zone_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/client/v4/zones/{ZONE}")))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(envelope_ok(&json!({ "id": ZONE, "name": "example.com" })))
            .expect(1)
            .mount(&server)
            .await;

        let (gateway, audit) = gateway(&server);
        let args = json!({ "zone_id": ZONE });
        let request = bind(find("get_zone").unwrap(), &args).unwrap();
        let response = gateway.send(&request, Some(&args)).await.unwrap();

        assert_eq!(response.result["name"], "example.com");

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, "get_zone");
        assert_eq!(records[0].outcome, Outcome::Success);
        assert!(records[0].error_summary.is_none());
        assert_eq!(records[0].parameters["zone_id"], ZONE);
    }

    #[tokio::test]
    async fn test_query_parameters_are_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client/v4/zones"))
            .and(query_param("account.id", "abc123"))
            .and(query_param("per_page", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "messages": [],
                "result": [],
                "result_info": { "page": 1, "per_page": 5, "count": 0, "total_count": 0 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (gateway, _audit) = gateway(&server);
        let args = json!({ "account_id": "abc123", "per_page": 5 });
        let request = bind(find("list_zones").unwrap(), &args).unwrap();
        let value = gateway.send(&request, Some(&args)).await.unwrap().into_value();

        assert_eq!(value["result_info"]["per_page"], 5);
    }

    #[tokio::test]
    async fn test_leaky_upstream_message_is_replaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/client/v4/zones/{ZONE}")))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "errors": [{
                    "code": 7003,
                    "message": "Could not route to /client/v4/zones/internal-shard-7, perhaps your object identifier is invalid?"
                }],
                "messages": [],
                "result": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (gateway, audit) = gateway(&server);
        let args = json!({ "zone_id": ZONE });
        let request = bind(find("get_zone").unwrap(), &args).unwrap();
        let err = gateway.send(&request, Some(&args)).await.unwrap_err();

        let GatewayError::Upstream { messages, status } = &err else {
            unreachable!("expected upstream error, got {err:?}");
        };
        assert_eq!(messages.as_slice(), [safe_message(7003)]);
        assert_eq!(*status, 400);
        assert!(!err.to_string().contains("internal-shard-7"));

        let lines = audit.lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("internal-shard-7"));
        let records = audit.records();
        assert_eq!(records[0].outcome, Outcome::Failure);
        assert_eq!(
            records[0].error_summary.as_deref(),
            Some(err.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let (gateway, audit) = gateway(&server);
        let request = bind(find("get_user").unwrap(), &Value::Null).unwrap();
        let err = gateway.send(&request, None).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Upstream API error: The upstream API is unavailable (HTTP 503)"
        );
        assert_eq!(audit.records().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_audited() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let (gateway, audit) = gateway_at(&format!("http://127.0.0.1:{port}/client/v4"));

        let request = bind(find("get_user").unwrap(), &Value::Null).unwrap();
        let err = gateway.send(&request, None).await.unwrap_err();

        assert!(matches!(err, GatewayError::Transport(_)));
        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, Outcome::Failure);
    }

    #[tokio::test]
    async fn test_each_call_consumes_a_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(envelope_ok(&json!({})))
            .mount(&server)
            .await;

        let (sink, _buffer) = AuditSink::in_memory();
        let limiter = Arc::new(
            RateLimiter::new(RateLimitConfig {
                capacity: 3,
                refill_per_second: 0.001,
            })
            .unwrap(),
        );
        let gateway = Gateway::new(
            &GatewayConfig::builder().base_url(server.uri()).build(),
            Arc::clone(&limiter),
            Arc::new(CredentialVault::new(SecretString::from(TOKEN.to_string())).unwrap()),
            Arc::new(sink),
        )
        .unwrap();

        let request = bind(find("get_user").unwrap(), &Value::Null).unwrap();
        gateway.send(&request, None).await.unwrap();
        gateway.send(&request, None).await.unwrap();

        assert_eq!(limiter.available_tokens(), 1);
    }

    #[tokio::test]
    async fn test_graphql_query_is_posted() {
        let server = MockServer::start().await;
        let query = "query { viewer { zones { zoneTag } } }";
        Mock::given(method("POST"))
            .and(path("/client/v4/graphql"))
            .and(body_json(json!({ "query": query, "variables": { "limit": 5 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "viewer": { "zones": [{ "zoneTag": ZONE }] } },
                "errors": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (gateway, audit) = gateway(&server);
        let data = gateway.graphql(query, Some(r#"{"limit": 5}"#)).await.unwrap();

        assert_eq!(data["viewer"]["zones"][0]["zoneTag"], ZONE);
        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, GRAPHQL_OPERATION);
        assert_eq!(records[0].outcome, Outcome::Success);
    }

    #[tokio::test]
    async fn test_graphql_mutation_never_reaches_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (gateway, audit) = gateway(&server);
        let err = gateway
            .graphql("mutation { deleteZone(id: \"x\") }", None)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::RejectedQuery(RejectReason::Mutation)));
        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, Outcome::Failure);
    }

    #[tokio::test]
    async fn test_graphql_invalid_variables() {
        let server = MockServer::start().await;
        let (gateway, audit) = gateway(&server);

        let err = gateway
            .graphql("{ viewer { zones { zoneTag } } }", Some("[1, 2]"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidVariables));
        assert_eq!(audit.records().len(), 1);
    }

    #[tokio::test]
    async fn test_graphql_variables_are_redacted_in_audit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/client/v4/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "viewer": { "zones": [] } },
                "errors": null
            })))
            .mount(&server)
            .await;

        let (gateway, audit) = gateway(&server);
        gateway
            .graphql(
                "{ viewer { zones { zoneTag } } }",
                Some(r#"{"apiToken":"hidden-variable-value","filter":{"secret":"nested-value"},"limit":5}"#),
            )
            .await
            .unwrap();

        let lines = audit.lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("hidden-variable-value"));
        assert!(!lines[0].contains("nested-value"));

        let variables = &audit.records()[0].parameters["variables"];
        assert_eq!(variables["apiToken"], cloudrelay_guard::REDACTED);
        assert_eq!(variables["filter"]["secret"], cloudrelay_guard::REDACTED);
        assert_eq!(variables["limit"], 5);
    }

    #[tokio::test]
    async fn test_unparsable_variables_text_is_not_recorded() {
        let server = MockServer::start().await;
        let (gateway, audit) = gateway(&server);

        let err = gateway
            .graphql(
                "{ viewer { zones { zoneTag } } }",
                Some(r#"{"apiToken":"hidden-variable-value""#),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidVariables));
        let lines = audit.lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].contains("hidden-variable-value"));
    }

    #[test]
    fn test_endpoint_joins_base_path() {
        let (sink, _buffer) = AuditSink::in_memory();
        let gateway = Gateway::new(
            &GatewayConfig::default(),
            Arc::new(RateLimiter::new(RateLimitConfig::default()).unwrap()),
            Arc::new(CredentialVault::new(SecretString::from(TOKEN.to_string())).unwrap()),
            Arc::new(sink),
        )
        .unwrap();

        assert_eq!(
            gateway.endpoint("/zones/abc/dns_records").as_str(),
            "https://api.cloudflare.com/client/v4/zones/abc/dns_records"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let (sink, _buffer) = AuditSink::in_memory();
        let result = Gateway::new(
            &GatewayConfig::builder().base_url("not a url").build(),
            Arc::new(RateLimiter::new(RateLimitConfig::default()).unwrap()),
            Arc::new(CredentialVault::new(SecretString::from(TOKEN.to_string())).unwrap()),
            Arc::new(sink),
        );
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }

    #[test]
    fn test_debug_hides_credential() {
        let (sink, _buffer) = AuditSink::in_memory();
        let gateway = Gateway::new(
            &GatewayConfig::default(),
            Arc::new(RateLimiter::new(RateLimitConfig::default()).unwrap()),
            Arc::new(CredentialVault::new(SecretString::from(TOKEN.to_string())).unwrap()),
            Arc::new(sink),
        )
        .unwrap();
        assert!(!format!("{gateway:?}").contains(TOKEN));
    }
}
