//! Read-only filter for free-form GraphQL analytics queries.
//!
//! This is a blocklist applied before anything is sent upstream. It rejects
//! introspection, mutations and subscriptions by pattern, and requires the text to open
//! with `query` or an anonymous `{`. The `mutation` and `subscription` keywords are
//! refused anywhere as whole words, since GraphQL ignores commas and `#` comments
//! between a keyword and its block. It does not parse GraphQL and is not a substitute
//! for server-side authorization.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};
use serde_json::{Map, Value};
use thiserror::Error;

/// Longest accepted query or variables payload, in characters.
pub const MAX_QUERY_LENGTH: usize = 10_000;

/// Why a query was rejected. Messages are fixed and never echo the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("query must be a non-empty string")]
    Empty,

    #[error("query exceeds the maximum length of 10000 characters")]
    TooLong,

    #[error("schema introspection is not allowed")]
    Introspection,

    #[error("mutations are not allowed; only read-only queries are permitted")]
    Mutation,

    #[error("subscriptions are not allowed")]
    Subscription,

    #[error("query must start with 'query' or '{{'")]
    NotAQuery,
}

/// Errors raised by [`validate_query`] and [`validate_variables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryGuardError {
    #[error("rejected query: {0}")]
    RejectedQuery(RejectReason),

    #[error("variables must be a JSON object of at most 10000 characters")]
    InvalidVariables,
}

const BLOCKLIST: &[(&str, RejectReason)] = &[
    (r"(?i)__schema", RejectReason::Introspection),
    (r"(?i)\b__type\b", RejectReason::Introspection),
    (r"(?i)\bmutation\b", RejectReason::Mutation),
    (r"(?i)\bsubscription\b", RejectReason::Subscription),
];

static BLOCKED: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(BLOCKLIST.iter().map(|(pattern, _)| pattern))
        .unwrap_or_else(|e| unreachable!("static query blocklist must compile: {e}"))
});

static QUERY_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:query\b|\{)")
        .unwrap_or_else(|e| unreachable!("static query opener must compile: {e}"))
});

/// Accepts `text` only if it looks like a read-only GraphQL query.
///
/// # Errors
///
/// Returns [`QueryGuardError::RejectedQuery`] with the first matching reason.
pub fn validate_query(text: &str) -> Result<(), QueryGuardError> {
    let reject = |reason| Err(QueryGuardError::RejectedQuery(reason));

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return reject(RejectReason::Empty);
    }
    if text.chars().count() > MAX_QUERY_LENGTH {
        return reject(RejectReason::TooLong);
    }

    if let Some(index) = BLOCKED.matches(text).iter().next() {
        return reject(BLOCKLIST[index].1);
    }

    if !QUERY_OPENER.is_match(trimmed) {
        return reject(RejectReason::NotAQuery);
    }

    Ok(())
}

/// Parses the optional variables payload.
///
/// Absent or blank input yields an empty object.
///
/// # Errors
///
/// Returns [`QueryGuardError::InvalidVariables`] if the text is not JSON, is not an
/// object, or is too long.
pub fn validate_variables(text: Option<&str>) -> Result<Map<String, Value>, QueryGuardError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Ok(Map::new());
    };

    if text.chars().count() > MAX_QUERY_LENGTH {
        return Err(QueryGuardError::InvalidVariables);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(QueryGuardError::InvalidVariables),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use serde_json::json;

    use super::*;

    fn rejected(text: &str) -> RejectReason {
        match validate_query(text) {
            Err(QueryGuardError::RejectedQuery(reason)) => reason,
            other => unreachable!("expected rejection for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_blocklist_compiles() {
        assert_eq!(BLOCKED.len(), BLOCKLIST.len());
    }

    #[test]
    fn test_accepts_named_and_anonymous_queries() {
        assert!(validate_query("query { zones { id } }").is_ok());
        assert!(validate_query("{ viewer { zones { id } } }").is_ok());
        assert!(
            validate_query(
                "query ZoneTraffic($zoneTag: string) { viewer { zones(filter: {zoneTag: $zoneTag}) { httpRequests1dGroups(limit: 7) { sum { requests } } } } }"
            )
            .is_ok()
        );
        assert!(validate_query("  \n  query { viewer { accounts { id } } }").is_ok());
    }

    #[test]
    fn test_rejects_introspection() {
        assert_eq!(
            rejected("{ __schema { types { name } } }"),
            RejectReason::Introspection
        );
        assert_eq!(
            rejected(r#"query { __type(name: "Zone") { fields { name } } }"#),
            RejectReason::Introspection
        );
        assert_eq!(rejected("{ __SCHEMA { queryType { name } } }"), RejectReason::Introspection);
    }

    #[test]
    fn test_typename_is_not_introspection() {
        assert!(validate_query("{ viewer { __typename } }").is_ok());
    }

    #[test]
    fn test_rejects_mutations() {
        assert_eq!(rejected("mutation { deleteZone }"), RejectReason::Mutation);
        assert_eq!(rejected("MUTATION{ deleteZone }"), RejectReason::Mutation);
        assert_eq!(
            rejected("mutation DeleteZone($id: ID!) { deleteZone(id: $id) }"),
            RejectReason::Mutation
        );
        assert_eq!(
            rejected("query { a } mutation { deleteZone }"),
            RejectReason::Mutation
        );
    }

    #[test]
    fn test_rejects_operations_hidden_by_ignored_tokens() {
        assert_eq!(
            rejected("query A { a } mutation # c\n B { deleteZone }"),
            RejectReason::Mutation
        );
        assert_eq!(
            rejected("query A { a } mutation,{ deleteZone }"),
            RejectReason::Mutation
        );
        assert_eq!(
            rejected("query A { a } subscription # c\n { events }"),
            RejectReason::Subscription
        );
        assert_eq!(
            rejected("query A { a } subscription,,{ events }"),
            RejectReason::Subscription
        );
    }

    #[test]
    fn test_rejects_subscriptions() {
        assert_eq!(rejected("subscription { events }"), RejectReason::Subscription);
        assert_eq!(
            rejected("Subscription OnEvent { events }"),
            RejectReason::Subscription
        );
    }

    #[test]
    fn test_field_names_containing_keywords_are_allowed() {
        assert!(validate_query("{ viewer { mutationLog { id } subscriptionPlan { id } } }").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_non_queries() {
        assert_eq!(rejected(""), RejectReason::Empty);
        assert_eq!(rejected("   \t\n"), RejectReason::Empty);
        assert_eq!(rejected("fragment F on Zone { id }"), RejectReason::NotAQuery);
        assert_eq!(rejected("SELECT * FROM zones"), RejectReason::NotAQuery);
        assert_eq!(rejected("queryish { x }"), RejectReason::NotAQuery);
    }

    #[test]
    fn test_rejects_oversized_query() {
        let long = format!("{{ viewer {{ {} }} }}", "a ".repeat(MAX_QUERY_LENGTH));
        assert_eq!(rejected(&long), RejectReason::TooLong);
    }

    #[test]
    fn test_rejection_message_is_static() {
        let err = validate_query("mutation { dropEverything_secret_value }").unwrap_err();
        assert!(!err.to_string().contains("dropEverything_secret_value"));
    }

    #[test]
    fn test_variables_object_is_parsed() {
        let vars = validate_variables(Some(r#"{"a":1}"#)).unwrap();
        assert_eq!(Value::Object(vars), json!({ "a": 1 }));
    }

    #[test]
    fn test_variables_absent_or_blank_is_empty_object() {
        assert!(validate_variables(None).unwrap().is_empty());
        assert!(validate_variables(Some("")).unwrap().is_empty());
        assert!(validate_variables(Some("  ")).unwrap().is_empty());
    }

    #[test]
    fn test_variables_rejects_non_objects() {
        for text in ["[1,2]", "not json", "42", "\"string\"", "null", "{\"a\":"] {
            assert_eq!(
                validate_variables(Some(text)).unwrap_err(),
                QueryGuardError::InvalidVariables,
                "{text}"
            );
        }
    }
}
