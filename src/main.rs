//! Highlighter - dispatcher for highlight-and-act AI actions.
//!
//! Main entry point for the CLI and the HTTP surface.

use clap::Parser;
use tracing::warn;

use highlighter_config::{ConfigLoader, ConfigValidator};

mod adapters;
mod cli;
mod cmd_account;
mod cmd_action;
mod server;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    let warnings = ConfigValidator::validate(&config).into_result()?;

    server::init_tracing(&config)?;
    for warning in &warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => server::run_server(config, host, port).await,
        Commands::Send { kind, payload, tab } => {
            cmd_action::run_send(&config, kind, payload, tab).await
        }
        Commands::Summarize { text, save } => cmd_action::run_summarize(&config, text, save).await,
        Commands::History { clear, json } => cmd_action::run_history(&config, clear, json).await,
        Commands::Events { max, json } => cmd_action::run_events(&config, max, json).await,
        Commands::Whoami => cmd_account::run_whoami(&config).await,
        Commands::Logout => cmd_account::run_logout(&config).await,
    }
}
