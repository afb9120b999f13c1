//! Lookup capabilities for the ragna reasoning delegate.
//!
//! Each lookup tool takes a free-text query and returns free text. Tools are
//! backed by a [`LookupProvider`] so the HTTP layer can be swapped in tests.

pub mod adaptor;
pub mod builtins;
pub mod http;
pub mod output_policy;
pub mod provider;
pub mod tool;

/// Tool adaptor helpers.
pub use adaptor::{ToolAdaptor, tool_to_adaptor, tools_to_adaptors};
/// Built-in lookup tools and the configured-set helper.
pub use builtins::{ArxivTool, WebSearchTool, WikipediaTool, lookup_tools};
/// reqwest-backed provider.
pub use http::HttpLookupProvider;
/// Lookup output shaping.
pub use output_policy::LookupOutputPolicy;
/// Provider interface and hit type.
pub use provider::{LookupHit, LookupProvider};
/// Tool error (re-exported from protocol).
pub use ragna_rs_protocol::ToolError;
/// Lookup tool trait.
pub use tool::LookupTool;
