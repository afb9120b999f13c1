//! Shared handler state.

use ragna_rs_config::RagnaConfig;
use ragna_rs_core::{CodingCoach, DelegateFactory, LlmConnector, SearchAssistant};
use ragna_rs_protocol::Credential;
use std::sync::Arc;

/// Immutable state shared by all handlers.
///
/// Nothing here holds a model client; assistants and coaches are built per
/// request from the caller's credential.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RagnaConfig>,
    pub connector: Arc<dyn LlmConnector>,
    pub delegates: Arc<dyn DelegateFactory>,
}

impl AppState {
    pub fn new(
        config: RagnaConfig,
        connector: Arc<dyn LlmConnector>,
        delegates: Arc<dyn DelegateFactory>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            connector,
            delegates,
        }
    }

    pub(crate) fn search_assistant(&self, credential: Credential) -> SearchAssistant {
        SearchAssistant::new(
            credential,
            self.connector.clone(),
            self.delegates.clone(),
            self.config.search.clone(),
        )
    }

    pub(crate) fn coach(&self, credential: Credential) -> CodingCoach {
        CodingCoach::new(
            credential,
            self.connector.clone(),
            self.config.coach.clone(),
        )
    }
}
