//! Stub model connector.

use autoagents_llm::LLMProvider;
use parking_lot::Mutex;
use ragna_rs_core::{LlmConnector, ModelOptions, RagnaCoreError};
use ragna_rs_protocol::Credential;
use std::sync::Arc;

/// Connector that hands out a fixed provider and records each request.
#[derive(Clone)]
pub struct StubConnector {
    llm: Option<Arc<dyn LLMProvider>>,
    pub connections: Arc<Mutex<Vec<(String, ModelOptions)>>>,
}

impl StubConnector {
    pub fn new(llm: Arc<dyn LLMProvider>) -> Self {
        Self {
            llm: Some(llm),
            connections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Connector that rejects every credential.
    pub fn rejecting() -> Self {
        Self {
            llm: None,
            connections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Options passed to the most recent `connect` call.
    pub fn last_options(&self) -> Option<ModelOptions> {
        self.connections
            .lock()
            .last()
            .map(|(_, options)| options.clone())
    }
}

impl LlmConnector for StubConnector {
    fn connect(
        &self,
        credential: &Credential,
        options: &ModelOptions,
    ) -> Result<Arc<dyn LLMProvider>, RagnaCoreError> {
        self.connections
            .lock()
            .push((credential.expose().to_string(), options.clone()));
        self.llm
            .clone()
            .ok_or_else(|| RagnaCoreError::InvalidCredential("rejected".to_string()))
    }
}
