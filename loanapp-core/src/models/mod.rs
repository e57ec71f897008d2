//! Domain records with validation at construction
//!
//! Raw form input becomes a `NewUser` only after validation; invalid input
//! returns `ValidationError`, not a panic.

pub mod loan;
pub mod quote;
pub mod user;
pub mod validation;

pub use loan::{Loan, LoanStatus, NewLoan, DEFAULT_STATUS};
pub use quote::LoanQuote;
pub use user::{NewUser, User, Username};
pub use validation::ValidationError;
