//! I/O boundary traits for testability
//!
//! The chart core never measures pixels or fetches data itself. These traits
//! are the capabilities the rendering and data-fetch collaborators provide.

use crate::domain::OrgTierRecord;
use crate::infrastructure::InfraResult;

/// Axis-aligned box in viewport coordinates (origin at the viewport's top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// How a scroll command should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Absolute document scroll target.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollCommand {
    /// Node the scroll centres on
    pub node_id: String,
    pub left: f64,
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// Provides the settled bounding box of a rendered node.
pub trait LayoutProbe {
    /// Bounding box relative to the viewport, or None when the node has
    /// no layout yet (not rendered, or the frame has not settled).
    fn bounding_box(&self, node_id: &str) -> Option<Rect>;
}

/// Scrollable display surface.
pub trait Viewport {
    /// Current document scroll offset as (left, top).
    fn scroll_position(&self) -> (f64, f64);

    /// Visible area as (width, height).
    fn size(&self) -> (f64, f64);

    /// Scroll to an absolute document offset.
    fn scroll_to(&mut self, command: &ScrollCommand);
}

/// Supplier of organization tier records.
pub trait RecordSource: Send + Sync {
    /// Fetch the full record list in source order.
    fn fetch(&self) -> InfraResult<Vec<OrgTierRecord>>;

    /// Human readable origin, used in logs and error messages.
    fn describe(&self) -> String;
}
