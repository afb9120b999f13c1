//! Tool doubles for the AutoAgents runtime and lookup providers.

use async_trait::async_trait;
use autoagents_core::tool::{ToolCallError, ToolRuntime, ToolT};
use parking_lot::Mutex;
use ragna_rs_config::LookupSource;
use ragna_rs_protocol::ToolError;
use ragna_rs_tools::{LookupHit, LookupProvider};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DummyToolRuntime {
    name: String,
    description: String,
}

impl DummyToolRuntime {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: "dummy tool".to_string(),
        }
    }
}

#[async_trait]
impl ToolRuntime for DummyToolRuntime {
    async fn execute(&self, _args: Value) -> Result<Value, ToolCallError> {
        Ok(json!({}))
    }
}

impl ToolT for DummyToolRuntime {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn args_schema(&self) -> Value {
        json!({ "type": "object" })
    }
}

/// Lookup provider returning canned hits and recording queries.
#[derive(Clone, Default)]
pub struct StubLookupProvider {
    hits: Vec<LookupHit>,
    pub queries: Arc<Mutex<Vec<(LookupSource, String, usize)>>>,
}

impl StubLookupProvider {
    pub fn new(hits: Vec<LookupHit>) -> Self {
        Self {
            hits,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LookupProvider for StubLookupProvider {
    async fn search(
        &self,
        source: LookupSource,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LookupHit>, ToolError> {
        self.queries
            .lock()
            .push((source, query.to_string(), limit));
        Ok(self.hits.iter().take(limit).cloned().collect())
    }
}
