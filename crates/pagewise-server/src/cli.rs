use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_SETTINGS_FILE: &str = "pagewise-settings.json";

/// Browser-assistant relay for OpenAI and Gemini
#[derive(Debug, Parser)]
#[command(name = "pagewise")]
#[command(version)]
#[command(about = "Browser-assistant relay for OpenAI and Gemini", long_about = None)]
pub struct Cli {
    /// Client settings file used by ask/action/settings
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the relay server (default when no command is given)
    Serve {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Send one message through a running relay
    Ask {
        /// Provider for this message (overrides the saved setting)
        #[arg(long)]
        provider: Option<String>,

        /// Message text
        #[arg(required = true, value_name = "MESSAGE")]
        message: Vec<String>,
    },

    /// Run a context-menu action (e.g. ai-summarize, translate-french) on some text
    Action {
        /// Menu id of the action
        action: String,

        /// Selected text
        #[arg(required = true, value_name = "TEXT")]
        text: Vec<String>,
    },

    /// Show or change client settings
    Settings {
        #[command(subcommand)]
        cmd: SettingsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the saved settings (API key masked)
    Show,
    /// Update one or more settings
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        server_url: Option<String>,
    },
}
