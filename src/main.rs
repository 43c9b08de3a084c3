mod backend;
mod config;
mod context;
mod pages;
mod routes;
mod state;
mod views;

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "synthwave=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let backend = match backend::SupabaseClient::new(config.backend_url.clone(), config.backend_key.clone(), config.timeouts) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "backend client init failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(backend = %config.backend_url, "backend client initialized");

    let port = config.port;
    let state = state::AppState::new(Arc::new(backend), config);
    let app = routes::app(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%port, "synthwave listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
