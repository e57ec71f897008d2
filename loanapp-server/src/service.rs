//! Account operations behind the HTTP handlers
//!
//! Each function acquires exactly one session through the router, using the
//! store role the routing policy assigns to its operation. Expected outcomes
//! (taken username, unknown login) are returned as values, not errors.

use loanapp_core::{NewUser, Operation};
use serde::Serialize;

use crate::db::{ConnectionRouter, DbError};

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered { user_id: i32 },
    UsernameTaken,
}

/// Result of a login lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Welcome { firstname: String },
    NotFound,
}

/// One row of the reports name list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListEntry {
    pub id: i32,
    pub name: String,
}

/// Aggregates shown on the reports page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_users: usize,
    pub total_loans_count: usize,
    pub user_list: Vec<UserListEntry>,
}

/// Register a user on PRIMARY.
///
/// The existence check and the insert are not atomic. A concurrent
/// registration that wins the race surfaces as a unique violation from the
/// store (at insert or commit) and is reported as `UsernameTaken`.
pub async fn register(
    router: &ConnectionRouter,
    new_user: NewUser,
) -> Result<RegistrationOutcome, DbError> {
    let mut session = router.acquire_for(Operation::Register).await?;

    if session
        .find_user_by_username(new_user.username.as_str())
        .await?
        .is_some()
    {
        tracing::info!(username = %new_user.username, "registration rejected: username taken");
        session.rollback().await?;
        return Ok(RegistrationOutcome::UsernameTaken);
    }

    let user = match session.insert_user(&new_user).await {
        Ok(user) => user,
        Err(e) if e.is_unique_violation() => {
            tracing::info!(username = %new_user.username, "registration lost insert race");
            session.rollback().await?;
            return Ok(RegistrationOutcome::UsernameTaken);
        }
        Err(e) => return Err(e),
    };

    match session.commit().await {
        Ok(()) => {}
        Err(e) if e.is_unique_violation() => {
            tracing::info!(username = %new_user.username, "registration lost commit race");
            return Ok(RegistrationOutcome::UsernameTaken);
        }
        Err(e) => return Err(e),
    }

    tracing::info!(user_id = user.id, username = %user.username, "user registered");
    Ok(RegistrationOutcome::Registered { user_id: user.id })
}

/// Look up `username` on REPLICA. May miss users not yet replicated.
pub async fn login(router: &ConnectionRouter, username: &str) -> Result<LoginOutcome, DbError> {
    let username = username.trim();
    let mut session = router.acquire_for(Operation::Login).await?;
    let found = session.find_user_by_username(username).await?;
    session.rollback().await?;

    Ok(match found {
        Some(user) => {
            tracing::debug!(user_id = user.id, "login lookup hit");
            LoginOutcome::Welcome {
                firstname: user.firstname,
            }
        }
        None => {
            tracing::info!(%username, "login lookup missed");
            LoginOutcome::NotFound
        }
    })
}

/// Full-table counts and name list from PRIMARY. No pagination.
pub async fn report(router: &ConnectionRouter) -> Result<ReportSummary, DbError> {
    let mut session = router.acquire_for(Operation::Reports).await?;
    let users = session.list_users().await?;
    let loans = session.list_loans().await?;
    session.rollback().await?;

    Ok(ReportSummary {
        total_users: users.len(),
        total_loans_count: loans.len(),
        user_list: users
            .iter()
            .map(|u| UserListEntry {
                id: u.id,
                name: u.full_name(),
            })
            .collect(),
    })
}
