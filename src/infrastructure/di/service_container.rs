//! Service container for dependency injection
//!
//! Wires the record source and settings into chart sessions.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{
    ChartSession, ControllerOptions, FetchState, RenderTree, TreeController,
};
use crate::config::Settings;
use crate::infrastructure::headless::{GridLayout, RecordingViewport};
use crate::infrastructure::source::JsonFileSource;
use crate::infrastructure::traits::{RecordSource, ScrollBehavior, Viewport};
use crate::infrastructure::InfraResult;

pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Record source
    pub source: Arc<dyn RecordSource>,
}

impl ServiceContainer {
    /// Container reading records from a JSON file.
    pub fn new(settings: Settings, records: &Path) -> Self {
        Self::with_deps(settings, Arc::new(JsonFileSource::new(records)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, source: Arc<dyn RecordSource>) -> Self {
        Self {
            settings: Arc::new(settings),
            source,
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            scroll_behavior: if self.settings.viewport.smooth_scroll {
                ScrollBehavior::Smooth
            } else {
                ScrollBehavior::Instant
            },
        }
    }

    /// Fetch records and feed them through a new session.
    ///
    /// A failed fetch leaves the session in its error state and returns the
    /// fetch error; a malformed record set returns the hierarchy error.
    pub fn open_session(&self) -> InfraResult<ChartSession> {
        let mut session = ChartSession::new(self.controller_options());
        session.on_fetch(FetchState::Loading)?;
        debug!("fetching records from {}", self.source.describe());
        match self.source.fetch() {
            Ok(records) => session.on_fetch(FetchState::Ready(records))?,
            Err(e) => {
                session.on_fetch(FetchState::Failed(e.to_string()))?;
                return Err(e);
            }
        }
        Ok(session)
    }

    /// Fetch and build a standalone controller.
    pub fn open_controller(&self) -> InfraResult<TreeController> {
        let records = self.source.fetch()?;
        Ok(TreeController::from_records(&records, self.controller_options())?)
    }

    pub fn viewport(&self) -> RecordingViewport {
        RecordingViewport::from_settings(&self.settings.viewport)
    }

    /// Settled layout for the current render tree as seen through `viewport`.
    pub fn layout(&self, render: &RenderTree<'_>, viewport: &dyn Viewport) -> GridLayout {
        GridLayout::compute(render, &self.settings.layout, viewport.scroll_position())
    }
}
