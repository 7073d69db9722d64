//! HTTP handlers.

mod health_handler;
mod operation_handler;

pub use health_handler::{health_check, health_routes, HealthResponse};
pub use operation_handler::{execute, operation_routes, Operation};
