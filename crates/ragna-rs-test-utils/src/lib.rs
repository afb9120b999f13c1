//! Test helpers shared across ragna crates.

pub mod connector;
pub mod delegate;
pub mod llm;
pub mod tools;

pub use connector::StubConnector;
pub use delegate::ScriptedDelegate;
pub use llm::{MockLLM, MockResponse};
pub use tools::{DummyToolRuntime, StubLookupProvider};
