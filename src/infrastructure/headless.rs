//! Headless stand-ins for the rendering collaborator.
//!
//! [`GridLayout`] places rendered cards on a simple tidy grid: leaves take
//! consecutive columns, parents sit centred over their first and last child,
//! rows are tree depth. [`RecordingViewport`] applies and records scrolls.

use std::collections::HashMap;

use crate::application::{RenderNode, RenderTree};
use crate::config::{LayoutSettings, ViewportSettings};
use crate::infrastructure::traits::{LayoutProbe, Rect, ScrollCommand, Viewport};

#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    /// Document-space boxes of rendered nodes
    boxes: HashMap<String, Rect>,
    scroll: (f64, f64),
}

impl GridLayout {
    /// Lay out the currently rendered nodes; boxes are reported relative to
    /// a viewport scrolled to `scroll`.
    pub fn compute(render: &RenderTree<'_>, settings: &LayoutSettings, scroll: (f64, f64)) -> Self {
        let mut boxes = HashMap::new();
        let mut next_column = 0usize;
        place(render.root(), 0, &mut next_column, settings, &mut boxes);
        Self { boxes, scroll }
    }

    /// Box in document coordinates.
    pub fn document_box(&self, node_id: &str) -> Option<Rect> {
        self.boxes.get(node_id).copied()
    }

    /// Width and height covering every card.
    pub fn extent(&self) -> (f64, f64) {
        self.boxes.values().fold((0.0, 0.0), |(w, h), r| {
            (w.max(r.x + r.width), h.max(r.y + r.height))
        })
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Returns the horizontal centre assigned to `node`.
fn place(
    node: RenderNode<'_>,
    depth: usize,
    next_column: &mut usize,
    settings: &LayoutSettings,
    boxes: &mut HashMap<String, Rect>,
) -> f64 {
    let mut centers = Vec::new();
    for child in node.children() {
        centers.push(place(child, depth + 1, next_column, settings, boxes));
    }

    let center = match (centers.first(), centers.last()) {
        (Some(first), Some(last)) => (first + last) / 2.0,
        _ => {
            let column = *next_column as f64;
            *next_column += 1;
            column * (settings.card_width + settings.h_gap) + settings.card_width / 2.0
        }
    };

    boxes.insert(
        node.id().to_string(),
        Rect::new(
            center - settings.card_width / 2.0,
            depth as f64 * (settings.card_height + settings.v_gap),
            settings.card_width,
            settings.card_height,
        ),
    );
    center
}

impl LayoutProbe for GridLayout {
    fn bounding_box(&self, node_id: &str) -> Option<Rect> {
        self.boxes.get(node_id).map(|r| {
            Rect::new(r.x - self.scroll.0, r.y - self.scroll.1, r.width, r.height)
        })
    }
}

/// Viewport that applies scroll commands immediately and keeps a log.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingViewport {
    width: f64,
    height: f64,
    scroll: (f64, f64),
    commands: Vec<ScrollCommand>,
}

impl RecordingViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll: (0.0, 0.0),
            commands: Vec::new(),
        }
    }

    pub fn from_settings(settings: &ViewportSettings) -> Self {
        Self::new(settings.width, settings.height)
    }

    pub fn commands(&self) -> &[ScrollCommand] {
        &self.commands
    }
}

impl Viewport for RecordingViewport {
    fn scroll_position(&self) -> (f64, f64) {
        self.scroll
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn scroll_to(&mut self, command: &ScrollCommand) {
        self.scroll = (command.left, command.top);
        self.commands.push(command.clone());
    }
}
