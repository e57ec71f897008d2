//! Store roles and the per-operation routing policy
//!
//! Writes and reports go to the authoritative PRIMARY store. Login reads
//! go to the REPLICA and tolerate replication lag. Pages that never touch
//! persistence have no role at all.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two configured stores a connection is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreRole {
    /// Writable, authoritative store
    Primary,
    /// Read-only, potentially lagging store
    Replica,
}

impl StoreRole {
    pub const ALL: [StoreRole; 2] = [StoreRole::Primary, StoreRole::Replica];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Replica => "replica",
        }
    }

    /// Sessions on this role must not mutate the store.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Replica)
    }
}

impl fmt::Display for StoreRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical request operations, one per HTTP endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Landing,
    RegisterPage,
    Reports,
    Register,
    Login,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::RegisterPage => "register_page",
            Self::Reports => "reports",
            Self::Register => "register",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation → store role. `None` means the operation never touches a store.
///
/// Reports read PRIMARY so counts are current; login accepts replica lag.
pub const ROUTING_POLICY: [(Operation, Option<StoreRole>); 5] = [
    (Operation::Landing, None),
    (Operation::RegisterPage, None),
    (Operation::Reports, Some(StoreRole::Primary)),
    (Operation::Register, Some(StoreRole::Primary)),
    (Operation::Login, Some(StoreRole::Replica)),
];

/// Look up the store role for `operation` in [`ROUTING_POLICY`].
pub fn role_for(operation: Operation) -> Option<StoreRole> {
    ROUTING_POLICY
        .iter()
        .find(|(op, _)| *op == operation)
        .and_then(|(_, role)| *role)
}
