//! In-process store
//!
//! Used as the injected test double and by the `memory` backend. Writes are
//! staged in the session and applied on commit. Username uniqueness and the
//! loan → user foreign key are checked on insert and again on commit, so two
//! racing registrations produce a conflict rather than a duplicate row.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use loanapp_core::{Loan, NewLoan, NewUser, StoreRole, User};

use super::{ConnectionProvider, DbError, StoreSession};

const USERNAME_CONSTRAINT: &str = "users_username_key";
const LOAN_OWNER_CONSTRAINT: &str = "loans_user_id_fkey";

#[derive(Debug, Default, Clone)]
struct Tables {
    users: Vec<User>,
    loans: Vec<Loan>,
}

#[derive(Debug, Default)]
struct Shared {
    tables: Mutex<Tables>,
    next_user_id: AtomicI32,
    next_loan_id: AtomicI32,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared in-memory tables behind a `ConnectionProvider`
///
/// Clones share the same tables and the same availability switch. A
/// `replica_view` shares the tables but can go down on its own.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
    role: StoreRole,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Empty writable store
    pub fn new() -> Self {
        Self::with_role(StoreRole::Primary)
    }

    /// Empty store for `role`. A replica store rejects writes.
    pub fn with_role(role: StoreRole) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            role,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read-only handle onto the same tables (a replica with zero lag).
    pub fn replica_view(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            role: StoreRole::Replica,
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Copy `source`'s committed rows into this store, standing in for
    /// external replication.
    pub fn replicate_from(&self, source: &MemoryStore) {
        let snapshot = source.shared.lock().clone();
        self.shared
            .next_user_id
            .store(max_id(snapshot.users.iter().map(|u| u.id)), Ordering::SeqCst);
        self.shared
            .next_loan_id
            .store(max_id(snapshot.loans.iter().map(|l| l.id)), Ordering::SeqCst);
        *self.shared.lock() = snapshot;
        tracing::debug!(role = %self.role, "replicated memory store");
    }

    /// Simulate the store going down (or coming back).
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.shared.lock().users.len()
    }

    pub fn loan_count(&self) -> usize {
        self.shared.lock().loans.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn max_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0)
}

#[async_trait]
impl ConnectionProvider for MemoryStore {
    fn role(&self) -> StoreRole {
        self.role
    }

    async fn acquire(&self) -> Result<Box<dyn StoreSession>, DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable {
                role: self.role,
                reason: "store marked unavailable".to_string(),
            });
        }
        Ok(Box::new(MemorySession {
            shared: Arc::clone(&self.shared),
            role: self.role,
            staged_users: Vec::new(),
            staged_loans: Vec::new(),
        }))
    }

    async fn ensure_schema(&self) -> Result<(), DbError> {
        Ok(())
    }
}

/// Session over a `MemoryStore`; staged rows are discarded unless committed
pub struct MemorySession {
    shared: Arc<Shared>,
    role: StoreRole,
    staged_users: Vec<User>,
    staged_loans: Vec<Loan>,
}

impl MemorySession {
    fn ensure_writable(&self) -> Result<(), DbError> {
        if self.role.is_read_only() {
            return Err(DbError::ReadOnly { role: self.role });
        }
        Ok(())
    }

    fn visible_users(&self) -> Vec<User> {
        let tables = self.shared.lock();
        tables
            .users
            .iter()
            .chain(self.staged_users.iter())
            .cloned()
            .collect()
    }

    fn visible_loans(&self) -> Vec<Loan> {
        let tables = self.shared.lock();
        tables
            .loans
            .iter()
            .chain(self.staged_loans.iter())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn find_user_by_username(&mut self, username: &str) -> Result<Option<User>, DbError> {
        Ok(self
            .visible_users()
            .into_iter()
            .find(|u| u.username == username))
    }

    async fn find_user_by_id(&mut self, id: i32) -> Result<Option<User>, DbError> {
        Ok(self.visible_users().into_iter().find(|u| u.id == id))
    }

    async fn insert_user(&mut self, user: &NewUser) -> Result<User, DbError> {
        self.ensure_writable()?;
        if self
            .visible_users()
            .iter()
            .any(|u| u.username == user.username.as_str())
        {
            return Err(DbError::UniqueViolation {
                constraint: USERNAME_CONSTRAINT.to_string(),
            });
        }

        // ids behave like a sequence: never reused, even after rollback
        let id = self.shared.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = user.clone().into_user(id);
        self.staged_users.push(stored.clone());
        Ok(stored)
    }

    async fn insert_loan(&mut self, loan: &NewLoan) -> Result<Loan, DbError> {
        self.ensure_writable()?;
        if !self.visible_users().iter().any(|u| u.id == loan.user_id) {
            return Err(DbError::ForeignKeyViolation {
                constraint: LOAN_OWNER_CONSTRAINT.to_string(),
            });
        }

        let id = self.shared.next_loan_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = loan.clone().into_loan(id);
        self.staged_loans.push(stored.clone());
        Ok(stored)
    }

    async fn list_users(&mut self) -> Result<Vec<User>, DbError> {
        let mut users = self.visible_users();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn list_loans(&mut self) -> Result<Vec<Loan>, DbError> {
        let mut loans = self.visible_loans();
        loans.sort_by_key(|l| l.id);
        Ok(loans)
    }

    async fn loans_for_user(&mut self, user_id: i32) -> Result<Vec<Loan>, DbError> {
        let mut loans: Vec<Loan> = self
            .visible_loans()
            .into_iter()
            .filter(|l| l.user_id == user_id)
            .collect();
        loans.sort_by_key(|l| l.id);
        Ok(loans)
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        let MemorySession {
            shared,
            staged_users,
            staged_loans,
            ..
        } = *self;
        let mut tables = shared.lock();

        // re-check constraints against rows committed since staging
        for user in &staged_users {
            if tables.users.iter().any(|u| u.username == user.username) {
                return Err(DbError::UniqueViolation {
                    constraint: USERNAME_CONSTRAINT.to_string(),
                });
            }
        }
        for loan in &staged_loans {
            let owner_exists = tables
                .users
                .iter()
                .chain(staged_users.iter())
                .any(|u| u.id == loan.user_id);
            if !owner_exists {
                return Err(DbError::ForeignKeyViolation {
                    constraint: LOAN_OWNER_CONSTRAINT.to_string(),
                });
            }
        }

        tables.users.extend(staged_users);
        tables.loans.extend(staged_loans);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DbError> {
        Ok(())
    }
}
