pub mod config;
pub mod error;
pub mod mailer;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::ServerConfig;
use mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: ServerConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            mailer,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/contact", post(routes::contact::contact))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
