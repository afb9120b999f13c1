//! Built-in lookup tools.

mod lookup;
mod utils;

pub use lookup::{ArxivTool, WebSearchTool, WikipediaTool};

use crate::{LookupOutputPolicy, LookupProvider, LookupTool};
use log::debug;
use ragna_rs_config::{LookupConfig, LookupSource};
use std::sync::Arc;

/// Build the lookup tools named in the config, in configured order.
pub fn lookup_tools(
    config: &LookupConfig,
    provider: Arc<dyn LookupProvider>,
) -> Vec<Arc<dyn LookupTool>> {
    let policy = LookupOutputPolicy::from(config);
    let tools = config
        .sources
        .iter()
        .map(|source| -> Arc<dyn LookupTool> {
            match source {
                LookupSource::Arxiv => Arc::new(ArxivTool::new(provider.clone(), policy.clone())),
                LookupSource::Wikipedia => {
                    Arc::new(WikipediaTool::new(provider.clone(), policy.clone()))
                }
                LookupSource::Web => {
                    Arc::new(WebSearchTool::new(provider.clone(), policy.clone()))
                }
            }
        })
        .collect::<Vec<_>>();
    debug!("lookup tools built (count={})", tools.len());
    tools
}

#[cfg(test)]
mod tests {
    use super::lookup_tools;
    use crate::{LookupHit, LookupProvider, ToolError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use ragna_rs_config::{LookupConfig, LookupSource};
    use std::sync::Arc;

    struct EmptyProvider;

    #[async_trait]
    impl LookupProvider for EmptyProvider {
        async fn search(
            &self,
            _source: LookupSource,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<LookupHit>, ToolError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn default_config_builds_arxiv_and_wikipedia() {
        let tools = lookup_tools(&LookupConfig::default(), Arc::new(EmptyProvider));
        let names = tools.iter().map(|tool| tool.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["arxiv", "wikipedia"]);
    }

    #[test]
    fn web_source_adds_search_tool() {
        let config = LookupConfig {
            sources: vec![LookupSource::Web, LookupSource::Wikipedia],
            ..LookupConfig::default()
        };
        let tools = lookup_tools(&config, Arc::new(EmptyProvider));
        let names = tools.iter().map(|tool| tool.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Search", "wikipedia"]);
    }
}
