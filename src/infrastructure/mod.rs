//! Infrastructure layer: I/O boundary traits, adapters and DI container
//!
//! This layer implements the capabilities the chart core consumes and wires
//! up sessions.

pub mod di;
pub mod error;
pub mod headless;
pub mod source;
pub mod traits;

pub use error::{InfraError, InfraResult};
