//! Wire protocol types for ragna: conversation messages, coaching scenarios,
//! HTTP request bodies, and common error types.

mod coach;
mod request;
mod tool;

pub use coach::{Difficulty, ScenarioKind, ScenarioRequest, ScenarioResponse, Topic};
pub use request::{
    ApiKeyValidation, ChatReply, ChatRequest, CodeReviewRequest, CredentialQuery, ProblemRequest,
    StudyPlanRequest, TopicRequest, ValidationStatus,
};
pub use tool::ToolError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker role for a conversation message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-authored instruction.
    System,
    /// User-authored message.
    User,
    /// Assistant-authored message.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Single entry of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Role that produced the message.
    pub role: Role,
    /// Message content.
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Model-provider credential supplied by the caller for a single request.
///
/// The value is never persisted and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the raw secret for client construction.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the credential is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(len={})", self.0.len())
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Credential, Message, Role};
    use pretty_assertions::assert_eq;

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message::assistant("hello");
        let value = serde_json::to_value(&message).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({ "role": "assistant", "content": "hello" })
        );
        assert_eq!(Role::System.as_str(), "system");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = serde_json::from_str::<Message>(r#"{"role":"tool","content":"x"}"#)
            .expect_err("unknown role");
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::from("gsk_secret");
        assert_eq!(format!("{credential:?}"), "Credential(len=10)");
        assert_eq!(credential.expose(), "gsk_secret");
        assert!(Credential::from("  ").is_blank());
    }
}
