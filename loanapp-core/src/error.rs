//! Structured error types for loanapp-core.
//!
//! Uses `thiserror` so the server library can compose these into its own
//! error types. The `loanapp` binary wraps them in `anyhow` for reporting.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating, reading or resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file named explicitly on the command line does not exist
    #[error("Config not found at {path:?}")]
    NotFound { path: PathBuf },

    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value (from file or environment) failed validation
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Convenience alias for configuration results
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
