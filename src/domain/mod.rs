//! Domain layer: records, the org chart tree and hierarchy assembly
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod record;

pub use arena::{ChartStats, NodeKind, NodeVariant, OrgNode, OrgTree};
pub use builder::{build, HierarchyBuilder};
pub use error::{DomainError, MalformedHierarchyError, TreeResult};
pub use record::{OrgTierRecord, Owner};
