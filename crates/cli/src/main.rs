//! storefront CLI entry point.
//!
//! Loads configuration, hydrates the persisted session, builds one API client
//! and runs a single command against it. Logging goes to stderr so stdout
//! carries only command output.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use storefront_client::{ApiClient, AuthRedirect, ClientConfig};
use storefront_core::{AppConfig, SessionStore, SqliteStorage};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod navigator;
mod output;

use cli::{Cli, Commands};
use navigator::TerminalNavigator;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let storage = SqliteStorage::open(&config.session_db_path)
        .await
        .with_context(|| format!("opening session store at {}", config.session_db_path.display()))?;
    let session = Arc::new(SessionStore::load(Arc::new(storage)).await?);
    let client = ApiClient::new(ClientConfig::from(&config), session)?;

    if matches!(cli.command, Commands::Admin(_)) {
        commands::ensure_admin(&client).await?;
    }

    let redirect = AuthRedirect::new(TerminalNavigator::new(cli.command.page()), config.login_path.as_str());
    let out = redirect.handle(commands::execute(&client, cli.command).await)?;
    output::print(&out)?;

    Ok(())
}
