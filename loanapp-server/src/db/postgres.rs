//! PostgreSQL-backed provider and session
//!
//! Each session is a transaction on a pooled connection. Sessions on the
//! REPLICA role are opened `READ ONLY` so a routing mistake fails loudly
//! instead of writing to the replica.

use async_trait::async_trait;
use loanapp_core::{Loan, NewLoan, NewUser, StoreConfig, StoreRole, User};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::pool::{create_lazy_pool, create_pool};
use super::{migrations, ConnectionProvider, DbError, StoreSession};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    username: String,
    firstname: String,
    lastname: String,
    age: i32,
    address: String,
    monthly_income: f64,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            firstname: r.firstname,
            lastname: r.lastname,
            age: r.age,
            address: r.address,
            monthly_income: r.monthly_income,
        }
    }
}

#[derive(Debug, FromRow)]
struct LoanRow {
    id: i32,
    amount: f64,
    term_months: i32,
    status: String,
    user_id: i32,
}

impl From<LoanRow> for Loan {
    fn from(r: LoanRow) -> Self {
        Self {
            id: r.id,
            amount: r.amount,
            term_months: r.term_months,
            status: r.status,
            user_id: r.user_id,
        }
    }
}

const USER_COLUMNS: &str = "id, username, firstname, lastname, age, address, monthly_income";
const LOAN_COLUMNS: &str = "id, amount, term_months, status, user_id";

/// Provider over one `PgPool`
#[derive(Clone)]
pub struct PgProvider {
    pool: PgPool,
    role: StoreRole,
}

impl PgProvider {
    pub fn new(pool: PgPool, role: StoreRole) -> Self {
        Self { pool, role }
    }

    /// Connect eagerly; fails now if the store is unreachable.
    pub async fn connect(role: StoreRole, config: &StoreConfig) -> Result<Self, DbError> {
        let pool = create_pool(config).await?;
        Ok(Self::new(pool, role))
    }

    /// Connect on first use.
    pub fn connect_lazy(role: StoreRole, config: &StoreConfig) -> Result<Self, DbError> {
        let pool = create_lazy_pool(config)?;
        Ok(Self::new(pool, role))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ConnectionProvider for PgProvider {
    fn role(&self) -> StoreRole {
        self.role
    }

    async fn acquire(&self) -> Result<Box<dyn StoreSession>, DbError> {
        let mut tx = self.pool.begin().await?;
        if self.role.is_read_only() {
            sqlx::query("SET TRANSACTION READ ONLY")
                .execute(&mut *tx)
                .await?;
        }
        Ok(Box::new(PgSession { tx }))
    }

    async fn ensure_schema(&self) -> Result<(), DbError> {
        migrations::run(&self.pool).await
    }
}

/// Transaction-scoped session. Dropping it rolls back.
pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreSession for PgSession {
    async fn find_user_by_username(&mut self, username: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_id(&mut self, id: i32) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(row.map(User::from))
    }

    async fn insert_user(&mut self, user: &NewUser) -> Result<User, DbError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, firstname, lastname, age, address, monthly_income)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(user.age)
        .bind(&user.address)
        .bind(user.monthly_income)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    async fn insert_loan(&mut self, loan: &NewLoan) -> Result<Loan, DbError> {
        let row = sqlx::query_as::<_, LoanRow>(&format!(
            r#"
            INSERT INTO loans (amount, term_months, status, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {LOAN_COLUMNS}
            "#
        ))
        .bind(loan.amount)
        .bind(loan.term_months)
        .bind(loan.status.as_str())
        .bind(loan.user_id)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    async fn list_users(&mut self) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_loans(&mut self) -> Result<Vec<Loan>, DbError> {
        let rows = sqlx::query_as::<_, LoanRow>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans ORDER BY id"
        ))
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn loans_for_user(&mut self, user_id: i32) -> Result<Vec<Loan>, DbError> {
        let rows = sqlx::query_as::<_, LoanRow>(&format!(
            "SELECT {LOAN_COLUMNS} FROM loans WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn commit(self: Box<Self>) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DbError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
