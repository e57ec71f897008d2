//! Static pages: landing and registration form
//!
//! Neither touches a store (their routing-policy role is `None`).

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET / - landing page with the sample quote
async fn landing(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates.landing(&state.landing_quote)?))
}

/// GET /register-page - registration form
async fn register_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.templates.register_page()?))
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing))
        .route("/register-page", get(register_page))
}
