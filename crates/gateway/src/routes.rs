//! Route configuration.

use axum::{middleware, Router};

use crate::handlers::{health_routes, operation_routes};
use crate::middleware::session_middleware;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no session)
        .nest("/health", health_routes())
        // Operation endpoint; every request gets an identity context
        .merge(operation_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        )))
        .with_state(state)
}
