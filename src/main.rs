//! Center Directory
//!
//! A voting-center directory kept in a local SQLite cache and replicated through a
//! single shared JSON document, plus the small blob server that hosts that document.

mod api;
mod app;
mod auth;
mod cli;
mod config;
mod db;
mod errors;
mod models;
mod search;
mod sync;

use std::sync::Arc;

use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::Config;
use db::BlobRepository;

/// Blob server state shared across all handlers.
#[derive(Clone)]
pub struct ServerState {
    pub repo: Arc<BlobRepository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve => serve(config).await,
        command => {
            cli::run(command, &config).await?;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting blob server");
    tracing::info!("Database path: {:?}", config.server_db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    let pool = db::init_database(&config.server_db_path).await?;
    let repo = Arc::new(BlobRepository::new(pool));

    let state = ServerState { repo };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the blob server router.
pub fn create_router(state: ServerState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route("/blobs/{id}", get(api::get_blob).put(api::put_blob));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
