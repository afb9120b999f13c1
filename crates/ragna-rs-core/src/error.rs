//! Error types for the core services.

use autoagents_llm::error::LLMError;
use thiserror::Error;

/// Closed set of failures surfaced by the search assistant and coding coach.
#[derive(Debug, Error)]
pub enum RagnaCoreError {
    /// The provider rejected the credential, or it could not be used at all.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    /// Any failure from the remote model call or the reasoning delegate.
    #[error("upstream error: {0}")]
    Upstream(String),
    /// Request parameters failed validation before dispatch.
    #[error("validation error: {0}")]
    Validation(String),
    /// A response stream ended early because an increment failed.
    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),
}

impl From<LLMError> for RagnaCoreError {
    fn from(err: LLMError) -> Self {
        RagnaCoreError::Upstream(err.to_string())
    }
}
