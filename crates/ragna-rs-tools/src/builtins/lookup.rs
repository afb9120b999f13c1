//! Built-in tools for web, encyclopedia and academic-index lookups.

use super::utils::{parse_args, schema_from_str};
use crate::{LookupOutputPolicy, LookupProvider, LookupTool};
use async_trait::async_trait;
use autoagents_core::tool::ToolInputT;
use autoagents_derive::ToolInput;
use log::{info, warn};
use ragna_rs_config::LookupSource;
use ragna_rs_protocol::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Arguments shared by every lookup tool.
#[derive(Debug, Serialize, Deserialize, ToolInput)]
struct LookupArgs {
    #[input(description = "Search query to look up.")]
    query: String,
}

/// Validate args, query the provider and render the hits.
async fn run_lookup(
    provider: &dyn LookupProvider,
    policy: &LookupOutputPolicy,
    source: LookupSource,
    args: Value,
) -> Result<String, ToolError> {
    let input: LookupArgs = parse_args(args)?;
    let query = input.query.trim();
    if query.is_empty() {
        return Err(ToolError::InvalidArguments(
            "query cannot be empty".to_string(),
        ));
    }
    info!(
        "lookup (source={:?}, query_len={}, top_k={})",
        source,
        query.len(),
        policy.top_k_results
    );
    let hits = provider
        .search(source, query, policy.top_k_results)
        .await
        .inspect_err(|err| warn!("lookup failed (source={:?}): {}", source, err))?;
    Ok(policy.render(source, &hits))
}

macro_rules! lookup_tool {
    ($ty:ident, $source:expr, $name:literal, $description:literal) => {
        #[doc = concat!("Lookup tool exposed to the model as `", $name, "`.")]
        pub struct $ty {
            provider: Arc<dyn LookupProvider>,
            policy: LookupOutputPolicy,
        }

        impl $ty {
            /// Create the tool over a provider and output policy.
            pub fn new(provider: Arc<dyn LookupProvider>, policy: LookupOutputPolicy) -> Self {
                Self { provider, policy }
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("policy", &self.policy)
                    .finish()
            }
        }

        #[async_trait]
        impl LookupTool for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn description(&self) -> &str {
                $description
            }

            fn args_schema(&self) -> Value {
                schema_from_str(LookupArgs::io_schema())
            }

            async fn call(&self, args: Value) -> Result<String, ToolError> {
                run_lookup(self.provider.as_ref(), &self.policy, $source, args).await
            }
        }
    };
}

lookup_tool!(
    WebSearchTool,
    LookupSource::Web,
    "Search",
    "Search the web for current events and general information. Input should be a search query."
);

lookup_tool!(
    WikipediaTool,
    LookupSource::Wikipedia,
    "wikipedia",
    "Look up people, places, companies, facts, historical events, or other subjects on Wikipedia. Input should be a search query."
);

lookup_tool!(
    ArxivTool,
    LookupSource::Arxiv,
    "arxiv",
    "Search scientific papers on arxiv.org covering physics, mathematics, computer science, quantitative biology, quantitative finance, statistics, electrical engineering, and economics. Input should be a search query."
);

#[cfg(test)]
mod tests {
    use super::{ArxivTool, WebSearchTool, WikipediaTool};
    use crate::{LookupHit, LookupOutputPolicy, LookupProvider, LookupTool};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use ragna_rs_config::LookupSource;
    use ragna_rs_protocol::ToolError;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingProvider {
        hits: Vec<LookupHit>,
        fail: bool,
        last: Mutex<Option<(LookupSource, String, usize)>>,
    }

    #[async_trait]
    impl LookupProvider for RecordingProvider {
        async fn search(
            &self,
            source: LookupSource,
            query: &str,
            limit: usize,
        ) -> Result<Vec<LookupHit>, ToolError> {
            *self.last.lock() = Some((source, query.to_string(), limit));
            if self.fail {
                return Err(ToolError::ExecutionFailed("offline".to_string()));
            }
            Ok(self.hits.clone())
        }
    }

    #[tokio::test]
    async fn lookup_rejects_empty_query() {
        let tool = WikipediaTool::new(
            Arc::new(RecordingProvider::default()),
            LookupOutputPolicy::default(),
        );
        let err = tool
            .call(json!({ "query": "  " }))
            .await
            .expect_err("empty query");
        let ToolError::InvalidArguments(message) = err else {
            panic!("expected invalid arguments");
        };
        assert_eq!(message, "query cannot be empty");
    }

    #[tokio::test]
    async fn lookup_passes_trimmed_query_and_top_k() {
        let provider = Arc::new(RecordingProvider {
            hits: vec![LookupHit::new("Graph", "A set of vertices.")],
            ..RecordingProvider::default()
        });
        let tool = WikipediaTool::new(provider.clone(), LookupOutputPolicy::default());
        let output = tool
            .call(json!({ "query": " graph theory " }))
            .await
            .expect("lookup");
        assert_eq!(output, "Page: Graph\nSummary: A set of vertices.");
        assert_eq!(
            provider.last.lock().clone(),
            Some((LookupSource::Wikipedia, "graph theory".to_string(), 1))
        );
    }

    #[tokio::test]
    async fn lookup_without_hits_returns_notice() {
        let tool = ArxivTool::new(
            Arc::new(RecordingProvider::default()),
            LookupOutputPolicy::default(),
        );
        let output = tool.call(json!({ "query": "qubits" })).await.expect("lookup");
        assert_eq!(output, "No good Arxiv result was found");
    }

    #[tokio::test]
    async fn lookup_propagates_provider_failure() {
        let tool = WebSearchTool::new(
            Arc::new(RecordingProvider {
                fail: true,
                ..RecordingProvider::default()
            }),
            LookupOutputPolicy::default(),
        );
        let err = tool
            .call(json!({ "query": "news" }))
            .await
            .expect_err("provider failure");
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[test]
    fn tools_expose_query_schema() {
        let tool = WebSearchTool::new(
            Arc::new(RecordingProvider::default()),
            LookupOutputPolicy::default(),
        );
        assert_eq!(tool.name(), "Search");
        let schema = tool.args_schema();
        assert!(schema["properties"]["query"].is_object());
    }
}
