//! Create the `users` and `loans` tables on PRIMARY

use anyhow::{bail, Context, Result};
use clap::Parser;

use loanapp_core::config::redact_url;
use loanapp_core::{Backend, LoanConfig, StoreRole};
use loanapp_server::db::{ConnectionProvider, PgProvider};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Primary connection string (overrides config/LOANAPP_PRIMARY_URL)
    #[arg(long)]
    pub primary_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, mut config: LoanConfig) -> Result<()> {
    if config.backend == Backend::Memory {
        bail!("The memory backend has no schema to migrate; set backend = \"postgres\"");
    }
    if let Some(url) = args.primary_url {
        config.primary.url = url;
    }

    tracing::info!(primary = %redact_url(&config.primary.url), "Migrating primary store");
    let primary = PgProvider::connect(StoreRole::Primary, &config.primary)
        .await
        .context("Failed to connect to the primary store")?;
    primary
        .ensure_schema()
        .await
        .context("Failed to create schema")?;

    println!("Schema is up to date on {}", redact_url(&config.primary.url));
    Ok(())
}
