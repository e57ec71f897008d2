//! loanapp-server: HTTP surface and store layer for the loan app
//!
//! Serves the landing, registration and report pages plus the register and
//! login actions. Reads and writes are routed to a PRIMARY or REPLICA store
//! according to a fixed per-operation policy.

pub mod db;
pub mod http;
pub mod render;
pub mod service;

pub use db::{ConnectionProvider, ConnectionRouter, DbError, MemoryStore, PgProvider, StoreSession};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use service::{LoginOutcome, RegistrationOutcome, ReportSummary};
