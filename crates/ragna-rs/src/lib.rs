//! Public SDK surface for ragna.
//!
//! This crate re-exports the building blocks and provides the small amount of
//! wiring shared by the `ragna` binary and embedders.

/// Re-export for convenience.
pub use ragna_rs_config as config;
pub use ragna_rs_core as core;
/// Re-export for convenience.
pub use ragna_rs_protocol as protocol;
pub use ragna_rs_server as server;
pub use ragna_rs_tools as tools;

use log::{debug, info};
use ragna_rs_config::{ConfigError, LayeredConfigOptions, RagnaConfig};
use ragna_rs_core::{GroqConnector, ReActDelegateFactory};
use ragna_rs_protocol::ToolError;
use ragna_rs_server::AppState;
use ragna_rs_tools::{HttpLookupProvider, lookup_tools};
use std::sync::Arc;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::builder()
            .format_timestamp_millis()
            .parse_default_env()
            .try_init();
    }
}

/// Load the layered config and apply a bind address override.
pub fn load_config(
    options: LayeredConfigOptions,
    bind: Option<String>,
) -> Result<RagnaConfig, ConfigError> {
    let layered = RagnaConfig::load_layered_with_options(options)?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    let mut config = layered.config;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    Ok(config)
}

/// Handler state backed by Groq and the public lookup endpoints.
pub fn hosted_state(config: RagnaConfig) -> Result<AppState, ToolError> {
    let provider = Arc::new(HttpLookupProvider::new()?);
    let tools = lookup_tools(&config.search.lookup, provider);
    info!(
        "lookup tools ready (count={}, max_turns={})",
        tools.len(),
        config.search.max_turns
    );
    let delegates = Arc::new(ReActDelegateFactory::new(tools, config.search.max_turns));
    Ok(AppState::new(config, Arc::new(GroqConnector), delegates))
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use pretty_assertions::assert_eq;
    use ragna_rs_config::{LayeredConfigOptions, LookupSource};
    use std::fs;

    #[test]
    fn bind_override_wins_over_layers() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join("ragna.json5"),
            "{ server: { bind: '127.0.0.1:9000' }, search: { lookup: { sources: ['web'] } } }",
        )
        .expect("write config");
        let options = LayeredConfigOptions::new(temp.path()).with_user_path(None);

        let config = load_config(options.clone(), None).expect("config");
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.search.lookup.sources, vec![LookupSource::Web]);

        let config = load_config(options, Some("0.0.0.0:8080".to_string())).expect("config");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn runtime_override_is_applied_last() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join("ragna.json5"),
            "{ coach: { temperature: 0.2 } }",
        )
        .expect("write cwd config");
        let runtime = temp.path().join("override.json5");
        fs::write(&runtime, "{ coach: { temperature: 1.1 } }").expect("write override");
        let options = LayeredConfigOptions::new(temp.path())
            .with_user_path(None)
            .with_runtime_path(&runtime);
        let config = load_config(options, None).expect("config");
        assert_eq!(config.coach.temperature, 1.1);
    }
}
