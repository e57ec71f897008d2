//! Reports page

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::service;

/// GET /reports - counts and name list, read from PRIMARY
async fn reports(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let summary = service::report(&state.stores).await?;
    Ok(Html(state.templates.reports(&summary)?))
}

/// Report routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reports", get(reports))
}

#[cfg(test)]
mod tests {
    use crate::http::routes::test_support::{get, post_form, send, split_app};

    #[tokio::test]
    async fn empty_store_reports_zero() {
        let (_primary, _replica, app) = split_app();
        let (status, body) = send(&app, get("/reports")).await;
        assert_eq!(status, 200);
        assert!(body.contains("<dd id=\"total-users\">0</dd>"));
        assert!(body.contains("<dd id=\"total-loans\">0</dd>"));
    }

    #[tokio::test]
    async fn reports_see_unreplicated_registrations() {
        let (_primary, _replica, app) = split_app();
        let form = "username=bob&firstname=Bob&lastname=Stone&age=40&address=2+Quarry+Rd&monthly_income=5100";
        let (status, _) = send(&app, post_form("/register", form)).await;
        assert_eq!(status, 200);

        let (status, body) = send(&app, get("/reports")).await;
        assert_eq!(status, 200);
        assert!(body.contains("<dd id=\"total-users\">1</dd>"));
        assert!(body.contains("Bob Stone"));
    }

    #[tokio::test]
    async fn primary_down_is_server_error() {
        let (primary, _replica, app) = split_app();
        primary.set_available(false);
        let (status, body) = send(&app, get("/reports")).await;
        assert_eq!(status, 500);
        assert!(body.contains("internal_error"));
    }
}
