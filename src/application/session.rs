//! Chart session: gates the core on the data-fetch lifecycle.
//!
//! The hierarchy is only built once a fetch succeeds. Loading and failure are
//! surfaced as status; a malformed record set is an error state and nothing is
//! rendered.

use tracing::{debug, warn};

use crate::application::controller::{ControllerOptions, TreeController};
use crate::application::render::RenderTree;
use crate::application::ApplicationResult;
use crate::domain::OrgTierRecord;

/// Outcome of the external fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Error(String),
    Ready,
}

pub struct ChartSession {
    options: ControllerOptions,
    controller: Option<TreeController>,
    status: SessionStatus,
}

impl ChartSession {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            options,
            controller: None,
            status: SessionStatus::Loading,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Feed a fetch result. A ready record list (re)builds the chart,
    /// merging prior node state by id.
    pub fn on_fetch(&mut self, fetch: FetchState<Vec<OrgTierRecord>>) -> ApplicationResult<()> {
        let records = match fetch {
            FetchState::Loading => {
                self.status = SessionStatus::Loading;
                return Ok(());
            }
            FetchState::Failed(message) => {
                warn!("record fetch failed: {}", message);
                self.status = SessionStatus::Error(message);
                return Ok(());
            }
            FetchState::Ready(records) => records,
        };

        let result = match self.controller.take() {
            Some(mut controller) => {
                let rebuilt = controller.rebuild(&records);
                self.controller = Some(controller);
                rebuilt
            }
            None => TreeController::from_records(&records, self.options)
                .map(|controller| self.controller = Some(controller)),
        };

        match result {
            Ok(()) => {
                debug!("session ready with {} records", records.len());
                self.status = SessionStatus::Ready;
                Ok(())
            }
            Err(e) => {
                self.status = SessionStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Render tree, only while the session is ready.
    pub fn render(&self) -> Option<RenderTree<'_>> {
        match self.status {
            SessionStatus::Ready => self.controller.as_ref().map(TreeController::render),
            _ => None,
        }
    }

    pub fn controller(&self) -> Option<&TreeController> {
        match self.status {
            SessionStatus::Ready => self.controller.as_ref(),
            _ => None,
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut TreeController> {
        match self.status {
            SessionStatus::Ready => self.controller.as_mut(),
            _ => None,
        }
    }
}
