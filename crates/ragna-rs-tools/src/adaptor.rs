//! Adaptor for autoagents tool trait.

use crate::LookupTool;
use async_trait::async_trait;
use autoagents_core::tool::{ToolCallError, ToolRuntime, ToolT};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Adapter that bridges lookup tools into the AutoAgents runtime.
#[derive(Clone)]
pub struct ToolAdaptor {
    /// Wrapped tool implementation.
    tool: Arc<dyn LookupTool>,
}

impl ToolAdaptor {
    /// Create a new tool adaptor.
    pub fn new(tool: Arc<dyn LookupTool>) -> Self {
        Self { tool }
    }
}

impl fmt::Debug for ToolAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolAdaptor")
            .field("name", &self.tool.name())
            .finish()
    }
}

#[async_trait]
impl ToolRuntime for ToolAdaptor {
    /// Execute a lookup; the text result is returned as a JSON string.
    async fn execute(&self, args: Value) -> Result<Value, ToolCallError> {
        self.tool
            .call(args)
            .await
            .map(Value::String)
            .map_err(|err| ToolCallError::RuntimeError(Box::new(err)))
    }
}

impl ToolT for ToolAdaptor {
    fn name(&self) -> &str {
        self.tool.name()
    }

    fn description(&self) -> &str {
        self.tool.description()
    }

    fn args_schema(&self) -> Value {
        self.tool.args_schema()
    }
}

/// Wrap a tool with an adaptor for AutoAgents.
pub fn tool_to_adaptor(tool: Arc<dyn LookupTool>) -> Arc<dyn ToolT> {
    Arc::new(ToolAdaptor::new(tool))
}

/// Wrap multiple tools with adaptors for AutoAgents.
pub fn tools_to_adaptors(tools: Vec<Arc<dyn LookupTool>>) -> Vec<Arc<dyn ToolT>> {
    tools.into_iter().map(tool_to_adaptor).collect()
}
