//! Inspect the resolved configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use loanapp_core::{LoanConfig, ROUTING_POLICY};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (passwords masked)
    Show,
    /// Print where the default config file is looked up
    Path,
    /// Print the store role each operation is routed to
    Routes,
}

pub fn run_config(args: ConfigArgs, config: &LoanConfig) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let rendered = config
                .redacted()
                .to_toml()
                .context("Failed to render config")?;
            print!("{}", rendered);
        }
        ConfigCommand::Path => match LoanConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(no home directory; defaults and environment only)"),
        },
        ConfigCommand::Routes => {
            for line in routing_table() {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn routing_table() -> Vec<String> {
    ROUTING_POLICY
        .iter()
        .map(|(operation, role)| {
            format!("{:<14} {}", operation.as_str(), role.map(|r| r.as_str()).unwrap_or("-"))
        })
        .collect()
}
