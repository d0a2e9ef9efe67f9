//! Application layer: tree interaction and render views
//!
//! This layer drives the domain tree and depends on I/O boundary traits.

pub mod controller;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod state;

pub use controller::{
    center_on, ControllerOptions, HighlightCleared, ToggleOutcome, TreeController,
    HIGHLIGHT_DURATION,
};
pub use error::{ApplicationError, ApplicationResult};
pub use render::{
    Badge, DisplayPayload, RenderForm, RenderNode, RenderTree, ToggleHandle, TreeNodeConvert,
};
pub use session::{ChartSession, FetchState, SessionStatus};
pub use state::{NodeState, StateStore};
