//! Request middleware.

mod auth;

pub use auth::{extract_token, session_middleware};
