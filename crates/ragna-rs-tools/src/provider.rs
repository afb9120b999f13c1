//! Lookup provider interface.

use async_trait::async_trait;
use ragna_rs_config::LookupSource;
use ragna_rs_protocol::ToolError;
use serde::{Deserialize, Serialize};

/// A single hit returned by a lookup backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupHit {
    /// Page or paper title. May be empty for untitled web snippets.
    pub title: String,
    /// Abstract, extract, or snippet text.
    pub summary: String,
    /// Publication date, when the source reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Author names, when the source reports them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

impl LookupHit {
    /// Build a hit with a title and summary only.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }
}

/// Backend that answers lookup queries for each source.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Search a source and return at most `limit` hits.
    async fn search(
        &self,
        source: LookupSource,
        query: &str,
        limit: usize,
    ) -> Result<Vec<LookupHit>, ToolError>;
}
