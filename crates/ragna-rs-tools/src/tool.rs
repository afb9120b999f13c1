//! Lookup tool trait definition.

use async_trait::async_trait;
use ragna_rs_protocol::ToolError;
use serde_json::Value;
use std::fmt::Debug;

/// Interface for query-in/text-out lookup tools.
#[async_trait]
pub trait LookupTool: Send + Sync + Debug {
    /// Return the tool name shown to the model.
    fn name(&self) -> &str;
    /// Return the tool description shown to the model.
    fn description(&self) -> &str;
    /// Return the JSON schema for tool arguments.
    fn args_schema(&self) -> Value;
    /// Run the lookup and return free text.
    async fn call(&self, args: Value) -> Result<String, ToolError>;
}
