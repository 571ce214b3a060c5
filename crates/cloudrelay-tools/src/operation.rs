use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use cloudrelay_client::{Gateway, OperationSpec, catalog};

use crate::schema::operation_schema;
use crate::{ToolDefinition, ToolImplementation};

/// Exposes one catalog operation as a tool.
pub struct OperationTool {
    spec: &'static OperationSpec,
    gateway: Arc<Gateway>,
}

impl OperationTool {
    #[must_use]
    pub const fn new(spec: &'static OperationSpec, gateway: Arc<Gateway>) -> Self {
        Self { spec, gateway }
    }

    #[must_use]
    pub const fn spec(&self) -> &'static OperationSpec {
        self.spec
    }
}

#[async_trait]
impl ToolImplementation for OperationTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.spec.name.to_string(),
            description: self.spec.description.to_string(),
            input_schema: operation_schema(self.spec),
        }
    }

    async fn execute(&self, args: &Value) -> Result<Value> {
        let request = catalog::bind(self.spec, args)?;
        let parameters = Some(args).filter(|args| !args.is_null());
        let response = self.gateway.send(&request, parameters).await?;
        Ok(response.into_value())
    }
}

/// One [`OperationTool`] per catalog entry.
#[must_use]
pub fn catalog_tools(gateway: &Arc<Gateway>) -> Vec<OperationTool> {
    catalog::operations()
        .iter()
        .map(|spec| OperationTool::new(spec, Arc::clone(gateway)))
        .collect()
}
