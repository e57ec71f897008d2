//! Liveness and store-wiring report
//!
//! Never opens a session, so it answers even when both stores are down.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use loanapp_core::{StoreRole, ROUTING_POLICY};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Role each configured provider reports, keyed by the slot it fills
    pub stores: BTreeMap<&'static str, StoreRole>,
    /// Operation -> store role; `null` for pages without store access
    pub routes: BTreeMap<&'static str, Option<StoreRole>>,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stores = StoreRole::ALL
        .into_iter()
        .map(|slot| (slot.as_str(), state.stores.provider(slot).role()))
        .collect();
    let routes = ROUTING_POLICY
        .iter()
        .map(|(operation, role)| (operation.as_str(), *role))
        .collect();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        stores,
        routes,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
