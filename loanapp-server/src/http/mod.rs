//! HTTP layer
//!
//! Axum server with:
//! - HTML pages (landing, registration form, reports)
//! - Form actions (register, login)
//! - Request tracing and graceful shutdown
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
