//! HTTP upload service for speaker-notes extraction.
//!
//! Accepts one `.pptx` upload per request and answers with either the
//! generated notes document or the notes as JSON. Requests share no mutable
//! state: each one owns its upload bytes, its staging file (if any) and its
//! output buffer.

mod config;
mod error;
mod handlers;
mod staging;
mod types;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use notes_docx::DocumentBuilder;
use notes_pptx::NotesPipeline;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
pub use error::ApiError;
pub use handlers::*;
pub use staging::StagedUpload;
pub use types::*;

/// Headroom for multipart framing on top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Read-only state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub pipeline: NotesPipeline,
    pub builder: Arc<DocumentBuilder>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: NotesPipeline::new(),
            builder: Arc::new(DocumentBuilder::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Build the API router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/process", post(process_document))
        .route("/api/notes", post(extract_notes))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.addr.clone();
    log::info!("Starting notes server on {}", addr);
    if let Some(dir) = &state.config.staging_dir {
        log::info!("Staging uploads under {}", dir.display());
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app).await
}
