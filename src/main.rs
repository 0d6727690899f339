//! dnd-chargen - Fifth-edition character generator
//!
//! Builds rule-consistent character sheets from race, class, background,
//! ability scores and level, keeps them consistent through level-ups,
//! equipment and spell changes, and stores them in a JSON file. Sheets are
//! available on the command line or as read-only HTML pages.

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::cli::{self, Cli, Command};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

fn setup_shutdown_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                return;
            }
        }
        cancel_token.cancel();
    });
}

async fn serve(state: Arc<AppState>, port: u16, cancel_token: CancellationToken) -> anyhow::Result<()> {
    let app = http::create_routes().with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            tracing::info!("HTTP server received shutdown signal");
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnd_chargen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cancel_token = CancellationToken::new();
    setup_shutdown_signal(cancel_token.clone());

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("Initialization Error: {:#}", e);
            return ExitCode::from(1);
        }
    };
    if cli.offline {
        config.enrichment_enabled = false;
    }

    let state = match AppState::new(config, cancel_token.clone()).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            println!("Initialization Error: {:#}", e);
            return ExitCode::from(1);
        }
    };
    tracing::debug!("Application state initialized");

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(state.config.server_port);
            if let Err(e) = serve(state, port, cancel_token).await {
                tracing::error!("Server error: {:#}", e);
                return ExitCode::from(1);
            }
        }
        command => {
            let output = cli::execute(state.character_service.as_ref(), command).await;
            println!("{}", output);
        }
    }

    ExitCode::SUCCESS
}
