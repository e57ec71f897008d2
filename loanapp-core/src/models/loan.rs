//! Loan records
//!
//! Every loan belongs to exactly one existing user (`loans.user_id`
//! references `users.id`). No HTTP handler creates loans; the store layer
//! exposes an insert path for origination flows and tests.

use serde::{Deserialize, Serialize};

use super::validation::{bounded_text, ValidationError};

/// Maximum length for a loan status (VARCHAR(20))
pub const MAX_STATUS_LEN: usize = 20;

/// Status assigned to loans created without one
pub const DEFAULT_STATUS: &str = "Pending";

/// Open-ended loan state ("Pending", "Approved", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoanStatus(String);

impl LoanStatus {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("status", s, MAX_STATUS_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        Self(DEFAULT_STATUS.to_owned())
    }
}

impl TryFrom<String> for LoanStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LoanStatus> for String {
    fn from(value: LoanStatus) -> Self {
        value.0
    }
}

/// Stored loan row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i32,
    pub amount: f64,
    pub term_months: i32,
    pub status: String,
    pub user_id: i32,
}

/// Loan to be inserted for an existing user
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoan {
    pub amount: f64,
    pub term_months: i32,
    pub status: LoanStatus,
    pub user_id: i32,
}

impl NewLoan {
    /// New loan in the default `Pending` state.
    pub fn pending(user_id: i32, amount: f64, term_months: i32) -> Self {
        Self {
            amount,
            term_months,
            status: LoanStatus::default(),
            user_id,
        }
    }

    pub fn with_status(mut self, status: LoanStatus) -> Self {
        self.status = status;
        self
    }

    pub fn into_loan(self, id: i32) -> Loan {
        Loan {
            id,
            amount: self.amount,
            term_months: self.term_months,
            status: self.status.0,
            user_id: self.user_id,
        }
    }
}
