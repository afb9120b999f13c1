//! Reasoning delegate: the tool-using agent behind the search assistant.

use crate::agent::{SearchAgent, limit_turns};
use crate::error::RagnaCoreError;
use crate::search::Directive;
use async_trait::async_trait;
use autoagents_core::agent::prebuilt::executor::ReActAgent;
use autoagents_core::agent::task::Task;
use autoagents_core::agent::{AgentBuilder, DirectAgent};
use autoagents_core::tool::ToolT;
use autoagents_llm::LLMProvider;
use futures_util::{Stream, StreamExt};
use log::{info, warn};
use ragna_rs_tools::{LookupTool, tools_to_adaptors};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;

/// Stream of raw increments produced by a delegate.
pub type IncrementStream =
    Pin<Box<dyn Stream<Item = Result<DelegateIncrement, RagnaCoreError>> + Send>>;

/// One increment of delegate output, classified by shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DelegateIncrement {
    /// Final or partial output text.
    Output { output: String },
    /// Nested message fragments; each entry is expected to carry `content`.
    Messages { messages: Vec<Value> },
    /// Any other shape. Skipped by consumers.
    Other(Value),
}

impl DelegateIncrement {
    /// Text fragments carried by this increment, in order.
    ///
    /// Unrecognised increments and message entries without textual
    /// `content` are logged and dropped.
    pub fn into_fragments(self) -> Vec<String> {
        match self {
            DelegateIncrement::Output { output } => vec![output],
            DelegateIncrement::Messages { messages } => messages
                .into_iter()
                .filter_map(|entry| match entry.get("content").and_then(Value::as_str) {
                    Some(content) => Some(content.to_string()),
                    None => {
                        warn!("skipping message fragment without content");
                        None
                    }
                })
                .collect(),
            DelegateIncrement::Other(value) => {
                warn!(
                    "skipping unrecognized stream increment (kind={})",
                    value_kind(&value)
                );
                Vec::new()
            }
        }
    }
}

fn value_kind(value: &Value) -> String {
    match value {
        Value::Object(map) => format!(
            "object[{}]",
            map.keys().cloned().collect::<Vec<_>>().join(",")
        ),
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Opaque capability that answers a directive, possibly consulting lookups.
#[async_trait]
pub trait ReasoningDelegate: Send + Sync {
    /// Run the directive to completion and return the final answer.
    async fn run(&self, directive: &Directive) -> Result<String, RagnaCoreError>;

    /// Run the directive and yield increments as they arrive.
    async fn run_stream(&self, directive: &Directive) -> Result<IncrementStream, RagnaCoreError>;
}

/// Builds one delegate per request around a freshly connected model client.
pub trait DelegateFactory: Send + Sync {
    fn build(&self, llm: Arc<dyn LLMProvider>) -> Arc<dyn ReasoningDelegate>;
}

/// Delegate backed by an AutoAgents ReAct agent with lookup tools.
pub struct ReActDelegate {
    llm: Arc<dyn LLMProvider>,
    tools: Vec<Arc<dyn ToolT>>,
    max_turns: usize,
}

impl ReActDelegate {
    pub fn new(llm: Arc<dyn LLMProvider>, tools: Vec<Arc<dyn ToolT>>, max_turns: usize) -> Self {
        Self {
            llm,
            tools,
            max_turns,
        }
    }

    fn agent(&self) -> ReActAgent<SearchAgent> {
        ReActAgent::new(SearchAgent::new(self.tools.clone()))
    }

    /// Model client for a single run; the turn budget starts fresh each time.
    fn llm(&self) -> Arc<dyn LLMProvider> {
        limit_turns(self.llm.clone(), self.max_turns)
    }

    /// The rendered directive is the whole task input; the raw query only
    /// reaches the model inside it.
    fn task(directive: &Directive) -> Task {
        Task::new(directive.text())
    }
}

#[async_trait]
impl ReasoningDelegate for ReActDelegate {
    async fn run(&self, directive: &Directive) -> Result<String, RagnaCoreError> {
        info!(
            "delegate run (tools={}, max_turns={}, directive_len={})",
            self.tools.len(),
            self.max_turns,
            directive.text().len()
        );
        let handle = AgentBuilder::<ReActAgent<SearchAgent>, DirectAgent>::new(self.agent())
            .llm(self.llm())
            .build()
            .await
            .map_err(|err| RagnaCoreError::Upstream(err.to_string()))?;
        let response: String = handle
            .agent
            .run(Self::task(directive))
            .await
            .map_err(|err| RagnaCoreError::Upstream(err.to_string()))?;
        info!("delegate complete (response_len={})", response.len());
        Ok(response)
    }

    async fn run_stream(&self, directive: &Directive) -> Result<IncrementStream, RagnaCoreError> {
        info!(
            "delegate stream (tools={}, max_turns={}, directive_len={})",
            self.tools.len(),
            self.max_turns,
            directive.text().len()
        );
        let handle = AgentBuilder::<ReActAgent<SearchAgent>, DirectAgent>::new(self.agent())
            .llm(self.llm())
            .stream(true)
            .build()
            .await
            .map_err(|err| RagnaCoreError::Upstream(err.to_string()))?;
        let stream = handle
            .agent
            .run_stream(Self::task(directive))
            .await
            .map_err(|err| RagnaCoreError::Upstream(err.to_string()))?;
        let mapped = stream.map(|chunk| {
            chunk
                .map(|output| DelegateIncrement::Output {
                    output: output.into(),
                })
                .map_err(|err| RagnaCoreError::Upstream(err.to_string()))
        });
        Ok(Box::pin(mapped))
    }
}

/// Factory for [`ReActDelegate`] with a fixed lookup tool set.
pub struct ReActDelegateFactory {
    tools: Vec<Arc<dyn LookupTool>>,
    max_turns: usize,
}

impl ReActDelegateFactory {
    pub fn new(tools: Vec<Arc<dyn LookupTool>>, max_turns: usize) -> Self {
        Self { tools, max_turns }
    }
}

impl DelegateFactory for ReActDelegateFactory {
    fn build(&self, llm: Arc<dyn LLMProvider>) -> Arc<dyn ReasoningDelegate> {
        Arc::new(ReActDelegate::new(
            llm,
            tools_to_adaptors(self.tools.clone()),
            self.max_turns,
        ))
    }
}
