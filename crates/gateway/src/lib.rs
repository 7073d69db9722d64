//! API Gateway Library
//!
//! HTTP surface of the authentication core: one operation endpoint gated by
//! the session middleware, plus a health probe.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use auth_service_lib::store::InMemoryCredentialStore;
use common::{AppError, AppResult};

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration until Ctrl-C.
pub async fn run_server(config: GatewayConfig) -> AppResult<()> {
    let store = Arc::new(InMemoryCredentialStore::new());
    let auth = auth_service_lib::build(&config.auth, store);

    let state = AppState::new(auth, config.service.service_name.clone());

    let app = create_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.service.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Gateway listening on http://{}/api", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
