//! Account actions: register and login
//!
//! Register always routes through PRIMARY, login through REPLICA.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
    Form, Json, Router,
};
use loanapp_core::NewUser;
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::service::{self, LoginOutcome, RegistrationOutcome};

/// Registration form fields. Numeric parsing failures are rejected by
/// the `Form` extractor before the handler runs.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub address: String,
    pub monthly_income: f64,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
}

/// Successful registration payload
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: i32,
}

/// Business-outcome error payload
#[derive(Debug, Serialize)]
pub struct OutcomeError {
    pub error: &'static str,
}

/// POST /register
async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ApiError> {
    let new_user = NewUser::new(
        &form.username,
        &form.firstname,
        &form.lastname,
        form.age,
        &form.address,
        form.monthly_income,
    )?;

    let response = match service::register(&state.stores, new_user).await? {
        RegistrationOutcome::Registered { user_id } => Json(RegisterResponse {
            message: "User registered successfully!",
            user_id,
        })
        .into_response(),
        RegistrationOutcome::UsernameTaken => (
            StatusCode::CONFLICT,
            Json(OutcomeError {
                error: "Username already taken",
            }),
        )
            .into_response(),
    };
    Ok(response)
}

/// POST /login - greeting fragment, or 400 fragment when unknown
async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<(StatusCode, Html<String>), ApiError> {
    match service::login(&state.stores, &form.username).await? {
        LoginOutcome::Welcome { firstname } => Ok((
            StatusCode::OK,
            Html(state.templates.login_welcome(&firstname)?),
        )),
        LoginOutcome::NotFound => Ok((
            StatusCode::BAD_REQUEST,
            Html(state.templates.login_not_found()?),
        )),
    }
}

/// Account routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use crate::http::routes::test_support::{post_form, send, split_app};

    const ALICE: &str = "username=alice&firstname=Alice&lastname=Liddell&age=30&address=1+Rabbit+Hole&monthly_income=4200.50";

    #[tokio::test]
    async fn register_returns_new_id() {
        let (primary, replica, app) = split_app();
        let (status, body) = send(&app, post_form("/register", ALICE)).await;
        assert_eq!(status, 200);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "User registered successfully!");
        assert_eq!(json["user_id"], 1);
        assert_eq!(primary.user_count(), 1);
        assert_eq!(replica.user_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_register_is_conflict() {
        let (primary, _replica, app) = split_app();
        send(&app, post_form("/register", ALICE)).await;
        let (status, body) = send(&app, post_form("/register", ALICE)).await;
        assert_eq!(status, 409);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Username already taken");
        assert_eq!(primary.user_count(), 1);
    }

    #[tokio::test]
    async fn non_numeric_age_is_rejected_before_handler() {
        let (primary, _replica, app) = split_app();
        let form = ALICE.replace("age=30", "age=thirty");
        let (status, _) = send(&app, post_form("/register", &form)).await;
        assert!((400..500).contains(&status));
        assert_eq!(primary.user_count(), 0);
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let (primary, _replica, app) = split_app();
        let (status, _) = send(&app, post_form("/register", "username=x")).await;
        assert!((400..500).contains(&status));
        assert_eq!(primary.user_count(), 0);
    }

    #[tokio::test]
    async fn blank_username_is_validation_error() {
        let (_primary, _replica, app) = split_app();
        let form = ALICE.replace("username=alice", "username=+++");
        let (status, body) = send(&app, post_form("/register", &form)).await;
        assert_eq!(status, 400);
        assert!(body.contains("validation_error"));
    }

    #[tokio::test]
    async fn login_before_replication_is_not_found() {
        let (_primary, _replica, app) = split_app();
        send(&app, post_form("/register", ALICE)).await;

        let (status, body) = send(&app, post_form("/login", "username=alice")).await;
        assert_eq!(status, 400);
        assert!(body.contains("User not found"));
    }

    #[tokio::test]
    async fn login_after_replication_greets_by_first_name() {
        let (primary, replica, app) = split_app();
        send(&app, post_form("/register", ALICE)).await;
        replica.replicate_from(&primary);

        let (status, body) = send(&app, post_form("/login", "username=alice")).await;
        assert_eq!(status, 200);
        assert!(body.contains("Welcome back, Alice!"));
    }

    #[tokio::test]
    async fn login_does_not_fall_back_to_primary() {
        let (_primary, replica, app) = split_app();
        send(&app, post_form("/register", ALICE)).await;
        replica.set_available(false);

        let (status, _) = send(&app, post_form("/login", "username=alice")).await;
        assert_eq!(status, 500);
    }
}
