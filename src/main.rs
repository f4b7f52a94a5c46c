//! Railway Operations Admin Backend
//!
//! A REST backend for railway internal tooling: train schedules, folder-organized
//! audio announcements, and news posts, persisted as JSON files on disk.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::Repository;

/// Cap on a whole multipart upload request; per-file limits are enforced
/// in the handler.
const MAX_UPLOAD_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Railway Operations Admin Backend");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Audio directory: {:?}", config.audio_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.download_token.is_none() {
        tracing::warn!(
            "No download token configured (RAILOPS_DOWNLOAD_TOKEN). Workspace download is disabled."
        );
    }

    // Initialize the JSON stores
    let paths = store::init_store(&config).await?;
    let repo = Arc::new(Repository::new(paths));

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Schedules
        .route("/schedules", get(api::list_schedules))
        .route("/schedules", post(api::create_schedule))
        .route("/schedules/reset", post(api::reset_schedules))
        .route("/schedules/{id}", patch(api::update_schedule))
        // Folders
        .route("/folders", get(api::list_folders))
        .route("/folders", post(api::create_folder))
        .route("/folders/{id}", put(api::rename_folder))
        .route("/folders/{id}", delete(api::delete_folder))
        // Uploads
        .route("/upload-audio", post(api::upload_audio))
        .route("/files", get(api::list_files))
        // Announcements
        .route("/annonces", get(api::list_annonces))
        .route("/annonces", post(api::create_annonce))
        .route("/annonces/{id}", delete(api::delete_annonce))
        // News
        .route("/news", get(api::list_news))
        .route("/news", post(api::create_news))
        .route("/news/{id}", get(api::get_news))
        .route("/news/{id}", delete(api::delete_news))
        // Workspace archive
        .route("/download-workspace", get(api::download_workspace))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        // Uploaded binaries are public, served straight off disk
        .nest_service("/audio", ServeDir::new(&state.config.audio_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
