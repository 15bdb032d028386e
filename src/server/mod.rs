//! HTTP layer over the chat and ingest services.

mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::models::ServerConfig;
use crate::services::{ChatService, IngestService};
use crate::store::ConversationStore;

/// Maximum accepted upload size.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Shared service handles for the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub ingest: Arc<IngestService>,
    pub store: Arc<dyn ConversationStore>,
}

/// Build the application router with CORS for the configured origins.
pub fn router(config: &ServerConfig, state: AppState) -> Router {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/documents/upload", post(routes::upload_document))
        .route("/chat", post(routes::chat_turn))
        .route("/chat/conversations", get(routes::list_conversations))
        .route(
            "/chat/conversations/{id}/messages",
            get(routes::list_messages),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is signalled to stop.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(host = %config.host, port = config.port, "listening");
    axum::serve(listener, router(config, state)).await
}
