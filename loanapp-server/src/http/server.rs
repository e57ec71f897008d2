//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use loanapp_core::{LoanConfig, LoanQuote};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::ConnectionRouter;
use crate::render::{RenderError, Templates};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl From<&LoanConfig> for ServerConfig {
    fn from(config: &LoanConfig) -> Self {
        Self {
            bind_addr: config.server.bind,
        }
    }
}

/// Shared application state
///
/// Everything here is read-only after startup.
pub struct AppState {
    pub stores: ConnectionRouter,
    pub templates: Templates,
    pub landing_quote: LoanQuote,
}

impl AppState {
    pub fn new(stores: ConnectionRouter, landing_quote: LoanQuote) -> Result<Self, RenderError> {
        Ok(Self {
            stores,
            templates: Templates::new()?,
            landing_quote,
        })
    }

    /// State for `config`, using its landing sample.
    pub fn from_config(stores: ConnectionRouter, config: &LoanConfig) -> Result<Self, RenderError> {
        let quote = LoanQuote::flat_rate(
            config.landing.sample_principal,
            config.landing.sample_rate_percent,
        );
        Self::new(stores, quote)
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::pages::router())
        .merge(routes::reports::router())
        .merge(routes::accounts::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let stores = ConnectionRouter::from_config(&config).await?;
/// stores.ensure_schema().await?;
/// let state = AppState::from_config(stores, &config)?;
/// run_server(state, ServerConfig::from(&config)).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn config_from_loan_config() {
        let mut loan_config = LoanConfig::default();
        loan_config.server.bind = SocketAddr::from(([0, 0, 0, 0], 9090));
        let config = ServerConfig::from(&loan_config);
        assert_eq!(config.bind_addr.port(), 9090);
    }

    #[test]
    fn state_uses_configured_quote() {
        let mut loan_config = LoanConfig::default();
        loan_config.landing.sample_principal = 2_000.0;
        loan_config.landing.sample_rate_percent = 10.0;
        let store = crate::db::MemoryStore::new();
        let stores = ConnectionRouter::new(Arc::new(store.clone()), Arc::new(store.replica_view()));
        let state = AppState::from_config(stores, &loan_config).unwrap();
        assert!((state.landing_quote.total_repayment - 2_200.0).abs() < 1e-9);
    }
}
