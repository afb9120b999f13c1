//! `ragna` command-line entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use ragna_rs::config::LayeredConfigOptions;
use ragna_rs::{hosted_state, init_logging, load_config, server};
use std::path::PathBuf;

/// Command-line options for the ragna service.
#[derive(Parser)]
#[command(name = "ragna", version, about = "Research search and coding coach API")]
struct Cli {
    /// Optional ragna.json5 applied on top of the user and cwd layers
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the effective config as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        options = options.with_runtime_path(path);
    }
    info!(
        "loading config (cwd={}, override_set={})",
        cwd.display(),
        cli.config.is_some()
    );

    match cli.command {
        Command::Serve { bind } => {
            let config = load_config(options, bind).context("failed to load config")?;
            let state = hosted_state(config).context("failed to build lookup provider")?;
            server::bind_and_serve(state)
                .await
                .context("server exited with error")?;
        }
        Command::Config => {
            let config = load_config(options, None).context("failed to load config")?;
            let rendered =
                serde_json::to_string_pretty(&config).context("failed to render config")?;
            println!("{rendered}");
        }
    }
    Ok(())
}
