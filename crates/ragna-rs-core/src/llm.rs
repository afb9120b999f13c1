//! Remote model client construction and single-shot completion.

use crate::error::RagnaCoreError;
use autoagents_llm::LLMProvider;
use autoagents_llm::backends::groq::Groq;
use autoagents_llm::builder::LLMBuilder;
use autoagents_llm::chat::{ChatMessage, ChatProvider, ChatRole, MessageType};
use log::debug;
use ragna_rs_protocol::{Credential, Message, Role};
use std::sync::Arc;

/// Sampling settings for one model client.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    /// Provider model name.
    pub model: String,
    /// Sampling temperature; `None` keeps the provider default.
    pub temperature: Option<f32>,
    /// Max-token ceiling; `None` omits it from the request.
    pub max_tokens: Option<u32>,
}

impl ModelOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Builds a model client for a caller credential.
///
/// Implementations must construct a fresh client on every call; clients are
/// owned by the request that asked for them.
pub trait LlmConnector: Send + Sync {
    fn connect(
        &self,
        credential: &Credential,
        options: &ModelOptions,
    ) -> Result<Arc<dyn LLMProvider>, RagnaCoreError>;
}

/// Connector for the Groq hosted API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqConnector;

impl LlmConnector for GroqConnector {
    fn connect(
        &self,
        credential: &Credential,
        options: &ModelOptions,
    ) -> Result<Arc<dyn LLMProvider>, RagnaCoreError> {
        if credential.is_blank() {
            return Err(RagnaCoreError::InvalidCredential(
                "api key is empty".to_string(),
            ));
        }
        debug!(
            "building groq client (model={}, temperature={:?}, max_tokens={:?})",
            options.model, options.temperature, options.max_tokens
        );
        let mut builder = LLMBuilder::<Groq>::new()
            .api_key(credential.expose())
            .model(options.model.clone());
        if let Some(temperature) = options.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }
        let llm: Arc<dyn LLMProvider> = builder.build()?;
        Ok(llm)
    }
}

/// Convert a conversation message into the provider chat format.
pub fn to_chat_message(message: &Message) -> ChatMessage {
    let role = match message.role {
        Role::System => ChatRole::System,
        Role::User => ChatRole::User,
        Role::Assistant => ChatRole::Assistant,
    };
    ChatMessage {
        role,
        message_type: MessageType::Text,
        content: message.content.clone(),
    }
}

/// Issue exactly one completion and return the first choice's text.
pub async fn complete(
    llm: &dyn LLMProvider,
    messages: &[Message],
) -> Result<String, RagnaCoreError> {
    let chat = messages.iter().map(to_chat_message).collect::<Vec<_>>();
    let response = llm.chat_with_tools(&chat, None, None).await?;
    response
        .text()
        .ok_or_else(|| RagnaCoreError::Upstream("model response contained no text".to_string()))
}
