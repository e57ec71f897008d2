//! Store-layer error type

use loanapp_core::{Operation, StoreRole};

/// Database error type
///
/// Constraint violations are split out of the raw driver error so callers
/// can treat them as business outcomes.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("{role} store is read-only")]
    ReadOnly { role: StoreRole },

    #[error("{role} store unavailable: {reason}")]
    Unavailable { role: StoreRole, reason: String },

    #[error("operation '{operation}' has no store role")]
    NoStoreRole { operation: Operation },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or("unknown").to_owned();
            if db.is_unique_violation() {
                return Self::UniqueViolation { constraint };
            }
            if db.is_foreign_key_violation() {
                return Self::ForeignKeyViolation { constraint };
            }
        }
        Self::Sqlx(e)
    }
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}
