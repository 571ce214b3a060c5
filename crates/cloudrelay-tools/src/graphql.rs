use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value, json};

use cloudrelay_client::{GRAPHQL_OPERATION, Gateway, GatewayError};
use cloudrelay_guard::query::MAX_QUERY_LENGTH;

use crate::schema::object_schema;
use crate::{ToolDefinition, ToolImplementation};

/// Read-only GraphQL analytics queries.
///
/// The query text is checked by the read-only filter before anything is sent.
/// `variables` may be given as JSON text or as an object.
pub struct GraphqlTool {
    gateway: Arc<Gateway>,
}

impl GraphqlTool {
    #[must_use]
    pub const fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ToolImplementation for GraphqlTool {
    fn definition(&self) -> ToolDefinition {
        let mut properties = Map::new();
        properties.insert(
            "query".to_string(),
            json!({
                "type": "string",
                "maxLength": MAX_QUERY_LENGTH,
                "description": "GraphQL query starting with 'query' or '{'. Mutations, subscriptions and introspection are rejected.",
            }),
        );
        properties.insert(
            "variables".to_string(),
            json!({
                "type": ["object", "string"],
                "maxLength": MAX_QUERY_LENGTH,
                "description": "Query variables as a JSON object or JSON text",
            }),
        );

        ToolDefinition {
            name: GRAPHQL_OPERATION.to_string(),
            description: "Run a read-only query against the GraphQL Analytics API".to_string(),
            input_schema: object_schema(properties, &["query"]),
        }
    }

    async fn execute(&self, args: &Value) -> Result<Value> {
        let (query, variables) = graphql_arguments(args)?;
        Ok(self.gateway.graphql(query, variables.as_deref()).await?)
    }
}

/// Splits tool arguments into the query text and the variables as JSON text.
fn graphql_arguments(args: &Value) -> Result<(&str, Option<String>), GatewayError> {
    let invalid = |message: &str| GatewayError::Validation(message.to_string());

    let args = args
        .as_object()
        .ok_or_else(|| invalid("arguments must be a JSON object"))?;
    if let Some(unknown) = args.keys().find(|k| !matches!(k.as_str(), "query" | "variables")) {
        return Err(GatewayError::Validation(format!("unknown parameter '{unknown}'")));
    }

    let query = match args.get("query") {
        Some(Value::String(query)) => query.as_str(),
        None | Some(Value::Null) => return Err(invalid("missing required parameter 'query'")),
        Some(_) => return Err(invalid("'query' must be a string")),
    };

    let variables = match args.get("variables") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(object @ Value::Object(_)) => Some(object.to_string()),
        Some(_) => return Err(GatewayError::InvalidVariables),
    };

    Ok((query, variables))
}
