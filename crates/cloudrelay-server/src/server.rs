//! MCP handler exposing the tool executor over stdio.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use tracing::{debug, info, warn};

use cloudrelay_tools::{ToolDefinition, ToolExecutor};

const INSTRUCTIONS: &str = "Read-only access to the Cloudflare API. Every tool issues a single \
    GET request (or a filtered GraphQL analytics query) and returns the raw JSON result. \
    Calls are rate limited and audited; no tool can modify account state.";

/// MCP server backed by a [`ToolExecutor`].
#[derive(Clone)]
pub struct RelayServer {
    executor: Arc<ToolExecutor>,
}

impl RelayServer {
    #[must_use]
    pub const fn new(executor: Arc<ToolExecutor>) -> Self {
        Self { executor }
    }

    /// Tool list advertised to the host.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.executor
            .get_all_tools()
            .into_iter()
            .map(to_mcp_tool)
            .collect()
    }

    /// Runs one tool call.
    ///
    /// Tool failures are returned as error results carrying the safe message, so the
    /// host sees them as tool output. Only an unknown tool name is a protocol error.
    ///
    /// # Errors
    ///
    /// Returns `invalid_params` if no tool has the given name.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        if !self.executor.has_tool(name) {
            warn!(tool = name, "Call to unknown tool");
            return Err(ErrorData::invalid_params(
                format!("Unknown tool: '{name}'"),
                None,
            ));
        }

        let args = arguments.map_or(Value::Null, Value::Object);
        debug!(tool = name, "Executing tool");

        match self.executor.execute_tool(name, &args).await {
            Ok(value) => {
                let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => {
                info!(tool = name, error = %e, "Tool call failed");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

impl std::fmt::Debug for RelayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayServer").finish_non_exhaustive()
    }
}

fn to_mcp_tool(definition: ToolDefinition) -> Tool {
    Tool::new(
        definition.name,
        definition.description,
        Arc::new(definition.input_schema),
    )
}

impl ServerHandler for RelayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&request.name, request.arguments).await
    }
}
