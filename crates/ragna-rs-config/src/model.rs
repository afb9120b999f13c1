//! Configuration schema for ragna.

use serde::{Deserialize, Serialize};

/// Root config for the ragna service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RagnaConfig {
    #[serde(default, rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub coach: CoachConfig,
}

impl RagnaConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> RagnaConfigBuilder {
        RagnaConfigBuilder::new()
    }
}

/// Builder for assembling a `RagnaConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct RagnaConfigBuilder {
    config: RagnaConfig,
}

impl RagnaConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: RagnaConfig::default(),
        }
    }

    /// Replace the HTTP server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the search assistant configuration.
    pub fn search(mut self, search: SearchConfig) -> Self {
        self.config.search = search;
        self
    }

    /// Replace the coding coach configuration.
    pub fn coach(mut self, coach: CoachConfig) -> Self {
        self.config.coach = coach;
        self
    }

    /// Finalize and return the built `RagnaConfig`.
    pub fn build(self) -> RagnaConfig {
        self.config
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: default_cors_origins(),
            api_prefix: default_api_prefix(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["https://ragnagroq.onrender.com".to_string()]
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

/// Settings for the retrieval-backed search assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_search_model")]
    pub model: String,
    /// Upper bound on reasoning turns the delegate may take.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    #[serde(default)]
    pub lookup: LookupConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model: default_search_model(),
            max_turns: default_max_turns(),
            lookup: LookupConfig::default(),
        }
    }
}

fn default_search_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_max_turns() -> usize {
    5
}

/// External lookup source available to the reasoning delegate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    /// Academic index (arXiv).
    Arxiv,
    /// Encyclopedia (Wikipedia).
    Wikipedia,
    /// General web search (DuckDuckGo).
    Web,
}

/// Lookup capability settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    #[serde(default = "default_top_k_results")]
    pub top_k_results: usize,
    #[serde(default = "default_doc_content_chars_max")]
    pub doc_content_chars_max: usize,
    #[serde(default = "default_lookup_sources")]
    pub sources: Vec<LookupSource>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            top_k_results: default_top_k_results(),
            doc_content_chars_max: default_doc_content_chars_max(),
            sources: default_lookup_sources(),
        }
    }
}

fn default_top_k_results() -> usize {
    1
}

fn default_doc_content_chars_max() -> usize {
    200
}

fn default_lookup_sources() -> Vec<LookupSource> {
    vec![LookupSource::Arxiv, LookupSource::Wikipedia]
}

/// Settings for the coding-practice coach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoachConfig {
    #[serde(default = "default_coach_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Max-token ceiling applied to free chat only.
    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            model: default_coach_model(),
            temperature: default_temperature(),
            chat_max_tokens: default_chat_max_tokens(),
        }
    }
}

fn default_coach_model() -> String {
    "mixtral-8x7b-32768".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_chat_max_tokens() -> u32 {
    4096
}
