//! Scripted chat model for tests.
//!
//! [`MockLLM`] answers every chat request from a fixed script and keeps a log
//! of what it was sent, so tests can assert on prompts, offered tools and the
//! number of completions without a network.

use async_trait::async_trait;
use autoagents_llm::chat::{
    ChatMessage, ChatProvider, ChatResponse, StreamChunk, StructuredOutputFormat, Tool,
};
use autoagents_llm::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use autoagents_llm::embedding::EmbeddingProvider;
use autoagents_llm::error::LLMError;
use autoagents_llm::models::ModelsProvider;
use autoagents_llm::{FunctionCall, LLMProvider, ToolCall};
use futures_util::{Stream, stream};
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, LLMError>> + Send>>;

/// What the model does with each request.
#[derive(Debug, Clone)]
enum Script {
    Reply(String),
    Stream(Vec<String>),
    Fail(String),
}

/// A tool the model asks for whenever it is offered.
#[derive(Debug, Clone)]
struct ToolRequest {
    name: String,
    arguments: Value,
}

#[derive(Debug, Default)]
struct ChatLog {
    calls: usize,
    last_messages: Vec<ChatMessage>,
    offered_tools: Vec<Vec<String>>,
}

/// Mock provider with a shared request log; clones observe the same log.
#[derive(Debug, Clone)]
pub struct MockLLM {
    script: Script,
    tool_request: Option<ToolRequest>,
    log: Arc<Mutex<ChatLog>>,
}

impl MockLLM {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            tool_request: None,
            log: Arc::new(Mutex::new(ChatLog::default())),
        }
    }

    /// Model that always answers `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self::with_script(Script::Reply(reply.into()))
    }

    /// Model whose streaming calls yield `chunks`; plain chat returns them joined.
    pub fn streaming(chunks: &[&str]) -> Self {
        Self::with_script(Script::Stream(
            chunks.iter().map(|chunk| chunk.to_string()).collect(),
        ))
    }

    /// Model that fails every request with a provider error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(message.into()))
    }

    /// Request `tool` with `arguments` on every turn where it is offered.
    pub fn calling_tool(mut self, tool: impl Into<String>, arguments: Value) -> Self {
        self.tool_request = Some(ToolRequest {
            name: tool.into(),
            arguments,
        });
        self
    }

    /// Number of completions issued so far.
    pub fn calls(&self) -> usize {
        self.log.lock().calls
    }

    /// Messages of the most recent chat request.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.log.lock().last_messages.clone()
    }

    /// Tool names offered on each chat request, oldest first.
    pub fn offered_tools(&self) -> Vec<Vec<String>> {
        self.log.lock().offered_tools.clone()
    }

    fn record(&self, messages: &[ChatMessage], tools: Option<&[Tool]>) -> Vec<String> {
        let names = tools
            .unwrap_or_default()
            .iter()
            .map(|tool| tool.function.name.clone())
            .collect::<Vec<_>>();
        let mut log = self.log.lock();
        log.calls += 1;
        log.last_messages = messages.to_vec();
        log.offered_tools.push(names.clone());
        names
    }

    fn reply_text(&self) -> Result<String, LLMError> {
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Stream(chunks) => Ok(chunks.concat()),
            Script::Fail(message) => Err(LLMError::ProviderError(message.clone())),
        }
    }

    fn tool_call_for(&self, offered: &[String]) -> Option<ToolCall> {
        let request = self.tool_request.as_ref()?;
        if !offered.contains(&request.name) {
            return None;
        }
        let index = self.log.lock().calls;
        Some(ToolCall {
            id: format!("call_{index}"),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: request.name.clone(),
                arguments: request.arguments.to_string(),
            },
        })
    }
}

/// Response carrying either text or tool calls.
#[derive(Debug, Clone)]
pub struct MockResponse {
    text: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

impl fmt::Display for MockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text.as_deref().unwrap_or_default())
    }
}

impl ChatResponse for MockResponse {
    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn tool_calls(&self) -> Option<Vec<ToolCall>> {
        self.tool_calls.clone()
    }
}

#[async_trait]
impl ChatProvider for MockLLM {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let offered = self.record(messages, tools);
        let text = self.reply_text()?;
        let response = match self.tool_call_for(&offered) {
            Some(call) => MockResponse {
                text: Some(String::new()),
                tool_calls: Some(vec![call]),
            },
            None => MockResponse {
                text: Some(text),
                tool_calls: None,
            },
        };
        Ok(Box::new(response))
    }

    async fn chat_stream_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<ChunkStream, LLMError> {
        self.record(messages, tools);
        let chunks = match &self.script {
            Script::Stream(chunks) => chunks.clone(),
            Script::Reply(text) => vec![text.clone()],
            Script::Fail(message) => return Err(LLMError::ProviderError(message.clone())),
        };
        Ok(Box::pin(stream::iter(
            chunks.into_iter().map(|chunk| Ok(StreamChunk::Text(chunk))),
        )))
    }
}

#[async_trait]
impl CompletionProvider for MockLLM {
    async fn complete(
        &self,
        _req: &CompletionRequest,
        _json_schema: Option<StructuredOutputFormat>,
    ) -> Result<CompletionResponse, LLMError> {
        self.log.lock().calls += 1;
        Ok(CompletionResponse {
            text: self.reply_text()?,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for MockLLM {
    async fn embed(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>, LLMError> {
        Ok(vec![Vec::new(); input.len()])
    }
}

#[async_trait]
impl ModelsProvider for MockLLM {}

impl LLMProvider for MockLLM {}
