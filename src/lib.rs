//! Interactive organizational chart core.
//!
//! Flat tier records are assembled into a single-rooted tree
//! ([`domain::HierarchyBuilder`]); a [`application::TreeController`] drives
//! per-node collapse and highlight state and centres toggled nodes in a
//! viewport.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
