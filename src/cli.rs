//! CLI definitions for Highlighter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Highlighter CLI.
#[derive(Parser)]
#[command(name = "highlighter")]
#[command(about = "Dispatcher for highlight-and-act AI actions")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to config/default.toml when present)
    #[arg(short, long, global = true, env = "HIGHLIGHTER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP surface (default)
    Serve {
        /// Bind host (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides [server] port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Dispatch one request and print its reply
    Send {
        /// Request kind, e.g. SummarizeText or GET_DIRECTIONS
        kind: String,

        /// JSON payload
        #[arg(long)]
        payload: Option<String>,

        /// Tab the request originates from
        #[arg(long)]
        tab: Option<u64>,
    },

    /// Summarize text, or the last stored selection when TEXT is omitted
    Summarize {
        text: Option<String>,

        /// Record the summary in history
        #[arg(long)]
        save: bool,
    },

    /// Show or clear summary history
    History {
        /// Clear all entries
        #[arg(long)]
        clear: bool,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// List upcoming events on the primary calendar
    Events {
        /// Maximum number of events
        #[arg(long, default_value_t = highlighter_protocols::DEFAULT_EVENT_COUNT)]
        max: u32,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the signed-in user
    Whoami,

    /// Forget the cached access token
    Logout,
}
