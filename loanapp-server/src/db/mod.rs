//! Store layer - connection providers, scoped sessions and routing
//!
//! # Design Principles
//!
//! - Providers are constructed explicitly and injected; no process globals
//! - One session per request, rolled back unless committed
//! - Rely on DB constraints, handle conflicts - the existence check before
//!   insert is advisory only

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod router;
pub mod session;

pub use error::DbError;
pub use memory::MemoryStore;
pub use pool::{create_lazy_pool, create_pool};
pub use postgres::PgProvider;
pub use router::ConnectionRouter;
pub use session::{ConnectionProvider, StoreSession};
