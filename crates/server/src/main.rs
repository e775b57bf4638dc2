mod config;
mod http;
mod state;

use adapter::{TrelloClient, TrelloConfig};
use anyhow::Context;
use dotenvy::dotenv;
use search::DocSources;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use config::Settings;
use http::router::build_router;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;

    if settings.trello.api_key.is_empty() || settings.trello.token.is_empty() {
        warn!("Trello credentials are empty; board calls will be rejected remotely.");
    }

    let trello = TrelloClient::new(TrelloConfig {
        api_key: settings.trello.api_key.clone(),
        token: settings.trello.token.clone(),
        board: settings.trello.board.clone(),
    });

    let sources = DocSources {
        word_path: PathBuf::from(&settings.sources.word_path),
        sheet_path: PathBuf::from(&settings.sources.sheet_path),
    };

    let state = AppState {
        trello: Arc::new(trello),
        sources: Arc::new(sources),
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
