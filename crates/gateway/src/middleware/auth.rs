//! Session middleware.
//!
//! Never rejects: a missing or invalid token yields an anonymous context and
//! each operation decides whether it needs more.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use auth_service_lib::service::bearer_token;

use crate::state::AppState;

/// Resolve the caller's identity and store it in the request extensions.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_token(request.headers());
    let context = state.sessions.identify(token.as_deref()).await;

    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Extract bearer token from the Authorization header.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    bearer_token(header).map(str::to_string)
}
