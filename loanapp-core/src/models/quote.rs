//! Sample loan quote shown on the landing page

use serde::Serialize;

/// Flat-rate repayment quote
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanQuote {
    pub borrow: f64,
    pub interest_rate_percent: f64,
    pub total_repayment: f64,
}

impl LoanQuote {
    /// Simple interest over the whole loan: `principal * (1 + rate / 100)`.
    pub fn flat_rate(principal: f64, rate_percent: f64) -> Self {
        Self {
            borrow: principal,
            interest_rate_percent: rate_percent,
            total_repayment: principal * (1.0 + rate_percent / 100.0),
        }
    }

    /// Rate formatted for display, e.g. "5%"
    pub fn interest_rate_label(&self) -> String {
        format!("{}%", self.interest_rate_percent)
    }
}
