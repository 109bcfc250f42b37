//! Server bootstrap and run loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::SpaceId;
use crate::error::ServerError;
use crate::infrastructure::{InMemorySpaceDirectory, JwtTokenVerifier};
use crate::registry::SpaceRegistry;
use crate::ui::handler::{get_space_detail, get_spaces, health_check, websocket_handler};
use crate::ui::signal::shutdown_signal;
use crate::ui::state::AppState;

/// Build the axum application on top of explicit shared state.
fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/spaces", get(get_spaces))
        .route("/api/spaces/{space_id}", get(get_space_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the presence server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    // Validate the configured space ids up front
    let mut spaces = Vec::with_capacity(config.spaces.len());
    for raw in &config.spaces {
        spaces.push(SpaceId::new(raw.clone())?);
    }
    tracing::info!("Provisioned spaces: {}", config.spaces.join(", "));

    let state = Arc::new(AppState {
        registry: Arc::new(SpaceRegistry::new()),
        verifier: Arc::new(JwtTokenVerifier::new(&config.jwt_secret)),
        directory: Arc::new(InMemorySpaceDirectory::new(spaces)),
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Presence server listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Presence server stopped");
    Ok(())
}
