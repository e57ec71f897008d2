//! HTTP server command
//!
//! Builds both store providers, creates the schema on PRIMARY and serves
//! until Ctrl+C/SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use loanapp_core::config::redact_url;
use loanapp_core::{Backend, LoanConfig};
use loanapp_server::db::ConnectionRouter;
use loanapp_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config/LOANAPP_BIND)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Store backend (overrides config/LOANAPP_BACKEND)
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Postgres,
    Memory,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Postgres => Backend::Postgres,
            BackendArg::Memory => Backend::Memory,
        }
    }
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut LoanConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: LoanConfig) -> Result<()> {
    args.apply(&mut config);

    match config.backend {
        Backend::Postgres => tracing::info!(
            primary = %redact_url(&config.primary.url),
            replica = %redact_url(&config.replica.url),
            "Connecting to PostgreSQL stores"
        ),
        Backend::Memory => {
            tracing::warn!("Using in-memory store: data is lost on shutdown")
        }
    }

    let stores = ConnectionRouter::from_config(&config)
        .await
        .context("Failed to connect to the primary store")?;

    stores
        .ensure_schema()
        .await
        .context("Failed to create schema on the primary store")?;

    let state = AppState::from_config(stores, &config).context("Failed to load templates")?;

    run_server(state, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
