//! Pagewise — relay between the browser assistant and LLM providers.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pagewise_chat::{ActionRequest, ProviderConfig, ProviderKind};
use pagewise_client::{
    Conversation, JsonFileSettingsStore, MenuAction, RelayClient, Settings, SettingsStore,
    SettingsUpdate,
};
use pagewise_core::ServerConfig;
use pagewise_server::cli::{Cli, Command, SettingsCommand};
use pagewise_server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    pagewise_core::load_dotenv();

    let Cli { settings, command } = Cli::parse();
    let store = JsonFileSettingsStore::new(&settings);

    match command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(port).await,
        Command::Ask { provider, message } => {
            let mut settings = store.load()?;
            if let Some(p) = provider {
                settings.api_provider = ProviderKind::parse_or_default(&p);
            }
            let client = RelayClient::from_settings(&settings);
            let request = Conversation::new().request(&message.join(" "), &settings);
            println!("{}", client.chat(&request).await?);
            Ok(())
        }
        Command::Action { action, text } => {
            if MenuAction::from_menu_id(&action).is_none() {
                anyhow::bail!("Unknown action: {}", action);
            }
            let settings = store.load()?;
            let request = ActionRequest {
                action,
                text: text.join(" "),
                provider: settings.api_provider,
                credential: settings.credential().map(str::to_string),
            };
            let client = RelayClient::from_settings(&settings);
            println!("{}", client.action(&request).await?);
            Ok(())
        }
        Command::Settings { cmd } => run_settings(cmd, &store, &settings),
    }
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }
    let providers = ProviderConfig::from_env();

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, providers)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Pagewise relay listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pagewise relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn run_settings(
    cmd: SettingsCommand,
    store: &JsonFileSettingsStore,
    path: &Path,
) -> anyhow::Result<()> {
    let mut settings = store.load()?;

    if let SettingsCommand::Set {
        api_key,
        provider,
        server_url,
    } = cmd
    {
        settings.apply_update(&SettingsUpdate {
            api_key,
            api_provider: provider.as_deref().map(ProviderKind::parse_or_default),
            server_url,
        });
        store.save(&settings)?;
    }

    print_settings(&settings, path);
    Ok(())
}

fn print_settings(settings: &Settings, path: &Path) {
    let key = settings
        .credential()
        .map(mask_key)
        .unwrap_or_else(|| "(not set)".to_string());
    println!("Settings file: {}", path.display());
    println!("  serverUrl:   {}", settings.server_url);
    println!("  apiProvider: {}", settings.api_provider);
    println!("  apiKey:      {}", key);
}

/// Show only the ends of a key, enough to tell two keys apart.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "(set)".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
