//! Tracing setup for the loanapp binary
//!
//! Usage:
//!   loanapp --debug ...                       # Debug logging to console
//!   RUST_LOG=loanapp_server=debug loanapp ... # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                                  # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info,sqlx=warn"
        }
    }
}

/// Initialize console tracing. RUST_LOG always wins over `--debug`.
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr) // keep stdout clean for `config show`
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_selects_debug_level() {
        assert_eq!(TracingConfig { debug: true }.default_directive(), "debug");
        assert!(TracingConfig::default().default_directive().starts_with("info"));
    }
}
