//! loanapp-core: domain records, store-role policy and configuration
//!
//! Shared by the HTTP server library and the `loanapp` binary.

pub mod config;
pub mod error;
pub mod models;
pub mod routing;

pub use config::{Backend, LoanConfig, StoreConfig};
pub use error::{ConfigError, ConfigResult};
pub use models::{Loan, LoanQuote, LoanStatus, NewLoan, NewUser, User, Username, ValidationError};
pub use routing::{role_for, Operation, StoreRole, ROUTING_POLICY};
