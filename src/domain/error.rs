//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Record set cannot be assembled into a single rooted tree.
///
/// Fatal to tree construction: callers must not render a partial chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedHierarchyError {
    #[error("no records supplied")]
    Empty,

    #[error("no root record: every record names a parent")]
    NoRoot,

    #[error("multiple root records: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    #[error("record {id} references missing parent {parent_id}")]
    DanglingParent { id: String, parent_id: String },

    #[error("duplicate record id: {0}")]
    DuplicateId(String),

    #[error("record {0} names itself as parent")]
    SelfParent(String),

    #[error("records not reachable from root (parent cycle): {}", .ids.join(", "))]
    Unreachable { ids: Vec<String> },
}

/// Domain errors represent violations of hierarchy invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed hierarchy: {0}")]
    MalformedHierarchy(#[from] MalformedHierarchyError),

    #[error("node not found: {0}")]
    NodeNotFound(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
