//! Turn cap for the reasoning agent, enforced at the model client.

use autoagents_llm::LLMProvider;
use autoagents_llm::async_trait;
use autoagents_llm::chat::{
    ChatMessage, ChatProvider, ChatResponse, StreamChunk, StreamResponse, StructuredOutputFormat,
    Tool,
};
use autoagents_llm::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use autoagents_llm::embedding::EmbeddingProvider;
use autoagents_llm::error::LLMError;
use autoagents_llm::models::ModelsProvider;
use futures_util::stream::Stream;
use log::{debug, warn};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wrap `llm` so one agent run gets at most `max_turns` chat turns.
///
/// Every chat request is one turn. The last permitted turn is sent without
/// tools, which leaves the model nothing to do but answer; any request past
/// the cap fails.
pub(crate) fn limit_turns(llm: Arc<dyn LLMProvider>, max_turns: usize) -> Arc<dyn LLMProvider> {
    Arc::new(TurnLimitedLLM {
        inner: llm,
        max_turns,
        turns: AtomicUsize::new(0),
    })
}

struct TurnLimitedLLM {
    inner: Arc<dyn LLMProvider>,
    max_turns: usize,
    turns: AtomicUsize,
}

impl TurnLimitedLLM {
    /// Claim the next turn and return the tools it may offer.
    fn claim<'a>(&self, tools: Option<&'a [Tool]>) -> Result<Option<&'a [Tool]>, LLMError> {
        let turn = self.turns.fetch_add(1, Ordering::SeqCst) + 1;
        if turn > self.max_turns {
            warn!("turn limit exceeded (max_turns={})", self.max_turns);
            return Err(LLMError::ProviderError(format!(
                "turn limit of {} reached",
                self.max_turns
            )));
        }
        if turn == self.max_turns && tools.is_some() {
            debug!("final turn, withholding tools (turn={turn})");
            return Ok(None);
        }
        Ok(tools)
    }
}

#[async_trait]
impl ChatProvider for TurnLimitedLLM {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let tools = self.claim(tools)?;
        self.inner.chat_with_tools(messages, tools, json_schema).await
    }

    async fn chat_with_web_search(&self, input: String) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.claim(None)?;
        self.inner.chat_with_web_search(input).await
    }

    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String, LLMError>> + Send>>, LLMError> {
        self.claim(None)?;
        self.inner.chat_stream(messages, json_schema).await
    }

    async fn chat_stream_struct(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamResponse, LLMError>> + Send>>, LLMError>
    {
        let tools = self.claim(tools)?;
        self.inner
            .chat_stream_struct(messages, tools, json_schema)
            .await
    }

    async fn chat_stream_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamChunk, LLMError>> + Send>>, LLMError> {
        let tools = self.claim(tools)?;
        self.inner
            .chat_stream_with_tools(messages, tools, json_schema)
            .await
    }
}

#[async_trait]
impl CompletionProvider for TurnLimitedLLM {
    async fn complete(
        &self,
        req: &CompletionRequest,
        json_schema: Option<StructuredOutputFormat>,
    ) -> Result<CompletionResponse, LLMError> {
        self.inner.complete(req, json_schema).await
    }
}

#[async_trait]
impl EmbeddingProvider for TurnLimitedLLM {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        self.inner.embed(input).await
    }
}

#[async_trait]
impl ModelsProvider for TurnLimitedLLM {}

impl LLMProvider for TurnLimitedLLM {}
