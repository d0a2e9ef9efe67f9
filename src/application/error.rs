//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, MalformedHierarchyError};

/// Application errors wrap domain errors and add interaction-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("node {0} is an account and cannot be expanded or collapsed")]
    NotToggleable(String),

    #[error("node {0} is hidden under a collapsed ancestor")]
    NotRendered(String),

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// The hierarchy violation behind this error, if any.
    pub fn malformed_hierarchy(&self) -> Option<&MalformedHierarchyError> {
        match self {
            Self::Domain(DomainError::MalformedHierarchy(e)) => Some(e),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
