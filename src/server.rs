//! HTTP server for iscd

use crate::config::ServerConfig;
use crate::normalizer::Normalizer;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub normalizer: Normalizer,
}

impl AppState {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    // Open API, no auth: all origins, methods, and headers allowed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::classify_routes())
        .merge(routes::root_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the HTTP server
pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let state = Arc::new(state);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("  Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
