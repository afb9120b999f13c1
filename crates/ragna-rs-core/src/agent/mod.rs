//! AutoAgents adapter for the retrieval assistant.

use async_trait::async_trait;
use autoagents_core::{
    agent::{AgentDeriveT, AgentHooks},
    tool::ToolT,
    tool::shared_tools_to_boxes,
};
use std::{fmt::Debug, sync::Arc};

mod turns;

pub(crate) use turns::limit_turns;

const SEARCH_AGENT_DESCRIPTION: &str = "Research assistant that answers questions by consulting \
    lookup tools for papers, encyclopedia entries and web results.";

/// Retrieval agent wrapper used by the AutoAgents runtime.
#[derive(Clone, Default)]
pub struct SearchAgent {
    /// Lookup tools available to the agent.
    tools: Vec<Arc<dyn ToolT>>,
}

impl Debug for SearchAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAgent")
            .field("tools", &self.tools.len())
            .finish()
    }
}

impl SearchAgent {
    pub fn new(tools: Vec<Arc<dyn ToolT>>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl AgentDeriveT for SearchAgent {
    type Output = String;

    fn description(&self) -> &str {
        SEARCH_AGENT_DESCRIPTION
    }

    fn output_schema(&self) -> Option<serde_json::Value> {
        None
    }

    fn name(&self) -> &str {
        "ragna-search"
    }

    fn tools(&self) -> Vec<Box<dyn ToolT>> {
        shared_tools_to_boxes(&self.tools)
    }
}

#[async_trait]
impl AgentHooks for SearchAgent {}
