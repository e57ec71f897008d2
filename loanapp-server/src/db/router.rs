//! Connection router: picks the PRIMARY or REPLICA provider per operation
//!
//! There is no failover between the two and no consistency guarantee;
//! reads routed to REPLICA may be stale.

use std::sync::Arc;

use loanapp_core::{role_for, Backend, LoanConfig, Operation, StoreRole};

use super::{ConnectionProvider, DbError, MemoryStore, PgProvider, StoreSession};

/// The two explicitly constructed store providers
#[derive(Clone)]
pub struct ConnectionRouter {
    primary: Arc<dyn ConnectionProvider>,
    replica: Arc<dyn ConnectionProvider>,
}

impl ConnectionRouter {
    pub fn new(primary: Arc<dyn ConnectionProvider>, replica: Arc<dyn ConnectionProvider>) -> Self {
        Self { primary, replica }
    }

    /// Build providers for the configured backend.
    ///
    /// PostgreSQL: PRIMARY connects eagerly (schema creation needs it),
    /// REPLICA connects on first use so startup does not depend on it.
    /// Memory: one store serves both roles, the replica as a read-only view.
    pub async fn from_config(config: &LoanConfig) -> Result<Self, DbError> {
        match config.backend {
            Backend::Postgres => {
                let primary = PgProvider::connect(StoreRole::Primary, &config.primary).await?;
                let replica = PgProvider::connect_lazy(StoreRole::Replica, &config.replica)?;
                Ok(Self::new(Arc::new(primary), Arc::new(replica)))
            }
            Backend::Memory => {
                let store = MemoryStore::new();
                let replica = store.replica_view();
                Ok(Self::new(Arc::new(store), Arc::new(replica)))
            }
        }
    }

    pub fn provider(&self, role: StoreRole) -> &Arc<dyn ConnectionProvider> {
        match role {
            StoreRole::Primary => &self.primary,
            StoreRole::Replica => &self.replica,
        }
    }

    /// Open a scoped session on `role`'s store.
    pub async fn acquire(&self, role: StoreRole) -> Result<Box<dyn StoreSession>, DbError> {
        tracing::debug!(%role, "acquiring session");
        self.provider(role).acquire().await.inspect_err(|e| {
            tracing::warn!(%role, error = %e, "failed to acquire session");
        })
    }

    /// Open a session on the store that the routing policy assigns to `operation`.
    pub async fn acquire_for(
        &self,
        operation: Operation,
    ) -> Result<Box<dyn StoreSession>, DbError> {
        let role = role_for(operation).ok_or(DbError::NoStoreRole { operation })?;
        tracing::debug!(%operation, %role, "routing operation");
        self.acquire(role).await
    }

    /// Create the schema on PRIMARY only.
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        self.primary.ensure_schema().await
    }
}
