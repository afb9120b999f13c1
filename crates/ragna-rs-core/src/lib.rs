//! Core services for ragna: the retrieval-backed search assistant and the
//! scenario-driven coding coach, plus the model client contract they share.

pub mod agent;
pub mod coach;
pub mod delegate;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod search;

pub use agent::SearchAgent;
pub use coach::CodingCoach;
pub use delegate::{
    DelegateFactory, DelegateIncrement, IncrementStream, ReActDelegate, ReActDelegateFactory,
    ReasoningDelegate,
};
pub use error::RagnaCoreError;
pub use llm::{GroqConnector, LlmConnector, ModelOptions, complete};
pub use search::{Directive, ResponseStream, SearchAssistant};
