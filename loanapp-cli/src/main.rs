//! loanapp CLI - loan registration web app
//!
//! Entry point for the `loanapp` binary:
//! - `serve`: run the HTTP server (pages, register, login, reports)
//! - `migrate`: create the schema on the primary store
//! - `config`: inspect the resolved configuration and routing policy

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loanapp_core::LoanConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "loanapp",
    author,
    version,
    about = "Loan registration web app with primary/replica store routing"
)]
struct Cli {
    /// Config file (default: ~/.loanapp/config.toml if present)
    #[arg(long, short = 'c', global = true, env = "LOANAPP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::ServeArgs),
    /// Create the users and loans tables on the primary store
    Migrate(commands::MigrateArgs),
    /// Inspect configuration (show, path, routes)
    Config(commands::ConfigArgs),
}

/// Load .env from the working directory, then ~/.loanapp/.env.
/// Variables already set in the environment are never overwritten.
fn load_env_files() {
    dotenvy::dotenv().ok();
    if let Some(home) = dirs::home_dir() {
        dotenvy::from_path(home.join(".loanapp").join(".env")).ok();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env_files();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config = LoanConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Migrate(args) => commands::run_migrate(args, config).await?,
        Commands::Config(args) => commands::run_config(args, &config)?,
    }

    Ok(())
}
