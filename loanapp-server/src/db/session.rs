//! Connection provider and scoped session traits
//!
//! A provider is one configured store (PRIMARY or REPLICA). Each request
//! acquires its own session from it; the session is a single unit of work
//! that ends with `commit` or `rollback`. Dropping a session without either
//! rolls it back and releases the underlying connection.

use async_trait::async_trait;
use loanapp_core::{Loan, NewLoan, NewUser, StoreRole, User};

use super::DbError;

/// Factory for scoped sessions against one store
#[async_trait]
pub trait ConnectionProvider: Send + Sync + 'static {
    /// Role this provider was configured for
    fn role(&self) -> StoreRole;

    /// Open a session. Fails if the store is unreachable; there is no retry.
    async fn acquire(&self) -> Result<Box<dyn StoreSession>, DbError>;

    /// Create the `users` and `loans` tables if missing.
    async fn ensure_schema(&self) -> Result<(), DbError>;
}

/// One unit of work against a store
#[async_trait]
pub trait StoreSession: Send {
    async fn find_user_by_username(&mut self, username: &str) -> Result<Option<User>, DbError>;

    async fn find_user_by_id(&mut self, id: i32) -> Result<Option<User>, DbError>;

    /// Insert a user. A taken username is `DbError::UniqueViolation`.
    async fn insert_user(&mut self, user: &NewUser) -> Result<User, DbError>;

    /// Insert a loan. An unknown owner is `DbError::ForeignKeyViolation`.
    async fn insert_loan(&mut self, loan: &NewLoan) -> Result<Loan, DbError>;

    /// All users, ordered by id
    async fn list_users(&mut self) -> Result<Vec<User>, DbError>;

    /// All loans, ordered by id
    async fn list_loans(&mut self) -> Result<Vec<Loan>, DbError>;

    async fn loans_for_user(&mut self, user_id: i32) -> Result<Vec<Loan>, DbError>;

    async fn commit(self: Box<Self>) -> Result<(), DbError>;

    async fn rollback(self: Box<Self>) -> Result<(), DbError>;
}
