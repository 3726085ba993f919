//! Marketplace Admin Console
//!
//! Command-line client for the marketplace admin backend:
//! 1. Loads backend and session settings
//! 2. Opens the persisted session (tokens and identity)
//! 3. Runs one subcommand through the authenticated gateway
//! 4. Prints the result as JSON on stdout; logs go to stderr

mod cli;
mod commands;
mod config;
mod session;

use std::sync::Arc;
use std::time::Duration;

use admin_api::AdminApi;
use admin_auth::CredentialStore;
use admin_gateway::Gateway;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;
use crate::session::{ConsoleNavigator, SESSION_EXPIRED_EXIT, session_ended};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // JSON logs on stderr with LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = Config::resolve_path(cli.config.as_deref());
    debug!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        base_url = %config.backend.base_url,
        credential_file = %config.session.credential_file.display(),
        "configuration loaded"
    );

    let store = CredentialStore::load(config.session.credential_file.clone())
        .await
        .with_context(|| {
            format!(
                "failed to open session file {}",
                config.session.credential_file.display()
            )
        })?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("marketplace-admin/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let navigator = Arc::new(ConsoleNavigator::default());
    let gateway = Gateway::new(
        client,
        config.gateway_config(),
        Arc::new(store),
        navigator.clone(),
    );
    let api = AdminApi::new(Arc::new(gateway));

    let outcome = commands::run(
        &api,
        Duration::from_secs(config.backend.timeout_secs),
        cli.command,
    )
    .await;

    if session_ended(&navigator, outcome.as_ref().err()) {
        if let Err(e) = &outcome {
            error!(error = %e, "command failed with expired session");
        }
        eprintln!("session expired; run `marketplace-admin login` to sign in again");
        std::process::exit(SESSION_EXPIRED_EXIT);
    }

    let output = outcome?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("failed to render output")?
    );
    Ok(())
}
