//! End-to-end checks of the primary/replica routing properties over the
//! HTTP surface, using in-memory stores as injected test doubles.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use loanapp_core::{LoanQuote, NewLoan, NewUser, StoreRole};
use loanapp_server::db::{ConnectionProvider, ConnectionRouter, DbError, MemoryStore};
use loanapp_server::{build_router, service, AppState, RegistrationOutcome};
use tower::ServiceExt;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("loanapp_server=debug")
        .with_test_writer()
        .try_init();
}

struct Harness {
    primary: MemoryStore,
    replica: MemoryStore,
    stores: ConnectionRouter,
    app: Router,
}

fn harness() -> Harness {
    init_tracing();
    let primary = MemoryStore::new();
    let replica = MemoryStore::with_role(StoreRole::Replica);
    let stores = ConnectionRouter::new(Arc::new(primary.clone()), Arc::new(replica.clone()));
    let state = AppState::new(stores.clone(), LoanQuote::flat_rate(10_000.0, 5.0)).unwrap();
    Harness {
        primary,
        replica,
        stores,
        app: build_router(state),
    }
}

fn register_form(username: &str, firstname: &str) -> Request<Body> {
    let body = format!(
        "username={username}&firstname={firstname}&lastname=Example&age=35&address=9+Elm+St&monthly_income=3900"
    );
    Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn login_form(username: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}")))
        .unwrap()
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn rows_named(store: &MemoryStore, username: &str) -> usize {
    let mut session = store.acquire().await.unwrap();
    session
        .list_users()
        .await
        .unwrap()
        .iter()
        .filter(|u| u.username == username)
        .count()
}

#[tokio::test]
async fn new_username_becomes_retrievable_from_primary() {
    let h = harness();
    for name in ["ann", "ben", "cat"] {
        let (status, _) = call(&h.app, register_form(name, "Person")).await;
        assert_eq!(status, StatusCode::OK);

        let mut session = h.primary.acquire().await.unwrap();
        assert!(session.find_user_by_username(name).await.unwrap().is_some());
    }
    assert_eq!(h.primary.user_count(), 3);
}

#[tokio::test]
async fn taken_username_creates_no_row() {
    let h = harness();
    call(&h.app, register_form("dana", "Dana")).await;
    for _ in 0..3 {
        let (status, body) = call(&h.app, register_form("dana", "Impostor")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("Username already taken"));
    }
    assert_eq!(rows_named(&h.primary, "dana").await, 1);
}

#[tokio::test]
async fn login_misses_until_replica_catches_up() {
    let h = harness();
    call(&h.app, register_form("alice", "Alice")).await;

    let (status, _) = call(&h.app, login_form("alice")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    h.replica.replicate_from(&h.primary);
    let (status, body) = call(&h.app, login_form("alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Alice"));
}

#[tokio::test]
async fn login_ignores_primary_only_presence() {
    let h = harness();
    // present on replica only: login succeeds even though primary is empty
    let seeded = MemoryStore::new();
    let mut session = seeded.acquire().await.unwrap();
    session
        .insert_user(&NewUser::new("eve", "Eve", "Only", 50, "replica", 1.0).unwrap())
        .await
        .unwrap();
    session.commit().await.unwrap();
    h.replica.replicate_from(&seeded);

    let (status, body) = call(&h.app, login_form("eve")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome back, Eve!"));
    assert_eq!(h.primary.user_count(), 0);
}

#[tokio::test]
async fn report_counts_match_primary() {
    let h = harness();
    let report = service::report(&h.stores).await.unwrap();
    assert_eq!((report.total_users, report.total_loans_count), (0, 0));

    call(&h.app, register_form("bob", "Bob")).await;
    let report = service::report(&h.stores).await.unwrap();
    assert_eq!(report.total_users, 1);
    assert_eq!(report.total_users, h.primary.user_count());
    assert_eq!(report.total_loans_count, h.primary.loan_count());
}

#[tokio::test]
async fn concurrent_same_username_registrations_store_one_row() {
    let h = harness();
    let attempts: Vec<_> = (0..8)
        .map(|i| {
            let stores = h.stores.clone();
            tokio::spawn(async move {
                let user = NewUser::new("racer", &format!("Racer{i}"), "X", 20, "track", 1.0).unwrap();
                service::register(&stores, user).await
            })
        })
        .collect();

    let mut registered = 0;
    for attempt in attempts {
        match attempt.await.unwrap().unwrap() {
            RegistrationOutcome::Registered { .. } => registered += 1,
            RegistrationOutcome::UsernameTaken => {}
        }
    }
    assert_eq!(registered, 1);
    assert_eq!(rows_named(&h.primary, "racer").await, 1);
}

#[tokio::test]
async fn every_loan_owner_resolves() {
    let h = harness();
    call(&h.app, register_form("owner", "Owner")).await;
    let mut session = h.primary.acquire().await.unwrap();
    let owner = session.find_user_by_username("owner").await.unwrap().unwrap();
    session
        .insert_loan(&NewLoan::pending(owner.id, 7_500.0, 36))
        .await
        .unwrap();
    let orphan = session.insert_loan(&NewLoan::pending(owner.id + 100, 1.0, 1)).await;
    assert!(matches!(orphan, Err(DbError::ForeignKeyViolation { .. })));
    session.commit().await.unwrap();

    let mut session = h.primary.acquire().await.unwrap();
    for loan in session.list_loans().await.unwrap() {
        assert!(session.find_user_by_id(loan.user_id).await.unwrap().is_some());
    }
    assert_eq!(h.primary.loan_count(), 1);
}
