//! # cloudrelay-tools
//!
//! Tool layer of the cloudrelay MCP server.
//!
//! Each catalog operation becomes an [`OperationTool`] and the GraphQL analytics endpoint
//! becomes a [`GraphqlTool`]. Tools are held in a [`ToolRegistry`] and invoked by name
//! through a [`ToolExecutor`].
//!
//! ## Core Components
//!
//! - [`ToolImplementation`]: definition plus async execution
//! - [`ToolRegistry`]: thread-safe map of tools by name
//! - [`ToolExecutor`]: lookup and execution
//! - [`schema`]: JSON Schema generated from operation parameters
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cloudrelay_client::{Gateway, GatewayConfig};
//! use cloudrelay_guard::{AuditSink, CredentialVault, RateLimitConfig, RateLimiter};
//! use cloudrelay_tools::ToolExecutor;
//! use secrecy::SecretString;
//! use serde_json::json;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let gateway = Arc::new(Gateway::new(
//!     &GatewayConfig::default(),
//!     Arc::new(RateLimiter::new(RateLimitConfig::default())?),
//!     Arc::new(CredentialVault::new(SecretString::from("api-token".to_string()))?),
//!     Arc::new(AuditSink::stderr()),
//! )?);
//!
//! let executor = ToolExecutor::with_catalog(&gateway);
//! let zones = executor.execute_tool("list_zones", &json!({ "per_page": 5 })).await?;
//! println!("{zones}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use cloudrelay_client::Gateway;

mod graphql;
mod operation;
pub mod schema;

pub use graphql::GraphqlTool;
pub use operation::{OperationTool, catalog_tools};

/// Name, description and input schema advertised to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema object describing the arguments.
    pub input_schema: Map<String, Value>,
}

#[async_trait]
pub trait ToolImplementation: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Runs the tool and returns the upstream JSON result.
    ///
    /// Error messages are safe to show to the host.
    async fn execute(&self, args: &Value) -> Result<Value>;
}

pub struct ToolRegistry {
    tools: Arc<DashMap<String, Arc<dyn ToolImplementation>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: Arc::new(DashMap::new()),
        }
    }

    pub fn register(&self, tool: Arc<dyn ToolImplementation>) {
        let name = tool.definition().name;
        if self.tools.insert(name.clone(), tool).is_some() {
            log::warn!("Tool '{name}' registered twice; keeping the latest");
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolImplementation>> {
        self.tools.get(name).map(|r| r.value().clone())
    }

    /// All definitions, sorted by name.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.iter().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
        }
    }

    /// Executor holding every catalog operation plus the GraphQL tool.
    #[must_use]
    pub fn with_catalog(gateway: &Arc<Gateway>) -> Self {
        let mut executor = Self::new();
        for tool in catalog_tools(gateway) {
            executor.add_tool(tool);
        }
        executor.add_tool(GraphqlTool::new(Arc::clone(gateway)));
        log::debug!("Registered {} tools", executor.registry.len());
        executor
    }

    pub fn add_tool<T: ToolImplementation + 'static>(&mut self, tool: T) {
        self.registry.register(Arc::new(tool));
    }

    #[must_use]
    pub fn has_tool(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    #[must_use]
    pub fn get_all_tools(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a tool by name.
    ///
    /// # Errors
    /// Returns an error if the tool is not found or if execution fails.
    pub async fn execute_tool(&self, name: &str, args: &Value) -> Result<Value> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: '{name}'"))?;

        tool.execute(args).await
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}
